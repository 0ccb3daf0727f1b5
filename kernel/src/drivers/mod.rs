/*
 * Hardware Drivers
 *
 * The console only talks to hardware through `ByteSink` ("transmit one
 * byte"); received bytes are pushed into it by the serial ISR. The 16550
 * UART driver in `serial` implements both directions.
 */

pub mod serial;

/// Transmit side of the console's byte transport.
pub trait ByteSink: Send + Sync {
    /// Transmit one byte. May block until the device is ready.
    fn put(&self, byte: u8);

    /// Transmit one byte from interrupt context or with the console lock
    /// held. Must never sleep; busy-waiting on the device is fine.
    fn put_sync(&self, byte: u8) {
        self.put(byte);
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &S {
    fn put(&self, byte: u8) {
        (**self).put(byte);
    }

    fn put_sync(&self, byte: u8) {
        (**self).put_sync(byte);
    }
}
