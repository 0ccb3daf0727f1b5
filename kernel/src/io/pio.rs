/*
 * Register I/O
 *
 * `Io` abstracts one device register so the UART driver can run against
 * x86 port I/O (`Pio`) in the kernel and against in-memory registers in
 * tests and simulators.
 */

use core::ops::{BitAnd, BitOr, Not};

/// I/O interface trait
pub trait Io {
    /// The value type used for I/O operations.
    type Value: Copy
        + PartialEq
        + BitAnd<Output = Self::Value>
        + BitOr<Output = Self::Value>
        + Not<Output = Self::Value>;

    /// Reads the value from the I/O interface.
    fn read(&self) -> Self::Value;

    /// Writes the value to the I/O interface.
    fn write(&mut self, value: Self::Value);

    /// Reads the value and checks if all of `flags` are set.
    fn readf(&self, flags: Self::Value) -> bool {
        (self.read() & flags) == flags
    }
}

/// Wrapper for an I/O interface providing read-only access.
pub struct ReadOnly<I> {
    inner: I,
}

impl<I> ReadOnly<I> {
    pub const fn new(inner: I) -> ReadOnly<I> {
        ReadOnly { inner }
    }
}

impl<I: Io> ReadOnly<I> {
    #[inline(always)]
    pub fn read(&self) -> I::Value {
        self.inner.read()
    }

    pub fn readf(&self, flags: I::Value) -> bool {
        self.inner.readf(flags)
    }
}

/// Byte-wide x86 I/O port
#[cfg(target_arch = "x86_64")]
#[derive(Copy, Clone)]
pub struct Pio<T> {
    port: u16,
    value: core::marker::PhantomData<T>,
}

#[cfg(target_arch = "x86_64")]
impl<T> Pio<T> {
    pub const fn new(port: u16) -> Self {
        Pio::<T> {
            port,
            value: core::marker::PhantomData,
        }
    }
}

#[cfg(target_arch = "x86_64")]
impl Io for Pio<u8> {
    type Value = u8;

    #[inline(always)]
    fn read(&self) -> u8 {
        let value: u8;
        // SAFETY: port I/O only touches the device behind `self.port`.
        unsafe {
            core::arch::asm!("in al, dx", out("al") value, in("dx") self.port, options(nostack, nomem, preserves_flags));
        }
        value
    }

    #[inline(always)]
    fn write(&mut self, value: u8) {
        // SAFETY: port I/O only touches the device behind `self.port`.
        unsafe {
            core::arch::asm!("out dx, al", in("dx") self.port, in("al") value, options(nostack, nomem, preserves_flags));
        }
    }
}
