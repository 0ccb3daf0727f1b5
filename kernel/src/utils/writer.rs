/*
 * Sink Writer
 *
 * `core::fmt::Write` on top of a `ByteSink`, so the console, the logger and
 * the shell can use `write!` to print on the terminal.
 */

use core::fmt;

use crate::drivers::ByteSink;

/// A writer that transmits every byte of its output to a sink.
pub struct SinkWriter<'a, U: ByteSink + ?Sized> {
    sink: &'a U,
}

impl<'a, U: ByteSink + ?Sized> SinkWriter<'a, U> {
    pub fn new(sink: &'a U) -> Self {
        Self { sink }
    }

    /// Writes a byte to the sink.
    ///
    /// Uses the synchronous path: callers may hold the console lock.
    pub fn write(&mut self, byte: u8) {
        self.sink.put_sync(byte);
    }
}

impl<U: ByteSink + ?Sized> fmt::Write for SinkWriter<'_, U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            self.write(byte);
        }
        Ok(())
    }
}
