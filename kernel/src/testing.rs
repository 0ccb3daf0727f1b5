/*
 * Test Fixtures
 *
 * Stand-ins shared by the unit tests: a terminal that records what the
 * console transmits, and a user buffer that faults at a chosen index.
 */

use std::string::String;
use std::sync::Mutex;
use std::vec::Vec;

use crate::drivers::ByteSink;
use crate::io::{CopyIn, CopyOut, Errno};

/// Terminal stand-in that records everything transmitted to it.
#[derive(Default)]
pub struct RecordingSink {
    bytes: Mutex<Vec<u8>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything transmitted since the last call.
    pub fn take(&self) -> Vec<u8> {
        core::mem::take(&mut *self.bytes.lock().unwrap())
    }

    pub fn take_string(&self) -> String {
        String::from_utf8_lossy(&self.take()).into_owned()
    }
}

impl ByteSink for RecordingSink {
    fn put(&self, byte: u8) {
        self.bytes.lock().unwrap().push(byte);
    }
}

/// User buffer whose page ends at `fault_at`: copies at or past it fail.
pub struct FaultingBuf {
    pub data: Vec<u8>,
    pub fault_at: usize,
}

impl FaultingBuf {
    pub fn new(len: usize, fault_at: usize) -> Self {
        Self {
            data: std::vec![0; len],
            fault_at,
        }
    }

    pub fn source(data: &[u8], fault_at: usize) -> Self {
        Self {
            data: data.to_vec(),
            fault_at,
        }
    }
}

impl CopyOut for FaultingBuf {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn copy_out(&mut self, index: usize, byte: u8) -> Result<(), Errno> {
        if index >= self.fault_at {
            return Err(Errno::EFAULT);
        }
        self.data[index] = byte;
        Ok(())
    }
}

impl CopyIn for FaultingBuf {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn copy_in(&self, index: usize) -> Result<u8, Errno> {
        if index >= self.fault_at {
            return Err(Errno::EFAULT);
        }
        Ok(self.data[index])
    }
}
