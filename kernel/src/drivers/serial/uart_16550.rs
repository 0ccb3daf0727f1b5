use core::convert::TryInto;

use bitflags::bitflags;

use crate::drivers::ByteSink;
use crate::io::{Io, ReadOnly};
use crate::arch::IrqMutex;
#[cfg(target_arch = "x86_64")]
use crate::io::Pio;

bitflags! {
    /// Interrupt enable flags
    struct IntEnFlags: u8 {
        const RECEIVED = 1;
        const SENT = 1 << 1;
        const ERRORED = 1 << 2;
        const STATUS_CHANGE = 1 << 3;
        // 4 to 7 are unused
    }
}

bitflags! {
    /// Line status flags
    struct LineStsFlags: u8 {
        const INPUT_FULL = 1;
        // 1 to 4 unknown
        const OUTPUT_EMPTY = 1 << 5;
        // 6 and 7 unknown
    }
}

/// Serial port representation.
pub struct SerialPort<T: Io> {
    data: T,                // Data register, read to receive, write to send
    int_en: T,              // Interrupt enable
    fifo_ctrl: T,           // FIFO control
    line_ctrl: T,           // Line control
    modem_ctrl: T,          // Modem control
    line_sts: ReadOnly<T>,  // Line status
}

#[cfg(target_arch = "x86_64")]
impl SerialPort<Pio<u8>> {
    /// Creates a serial port on the I/O ports starting at `base`.
    pub const fn new(base: u16) -> SerialPort<Pio<u8>> {
        SerialPort {
            data: Pio::new(base),
            int_en: Pio::new(base + 1),
            fifo_ctrl: Pio::new(base + 2),
            line_ctrl: Pio::new(base + 3),
            modem_ctrl: Pio::new(base + 4),
            line_sts: ReadOnly::new(Pio::new(base + 5)),
        }
    }
}

impl<T: Io> SerialPort<T>
where
    T::Value: From<u8> + TryInto<u8>,
{
    /// Creates a serial port whose registers are built by `make`, which is
    /// handed the register offset (0 = data .. 5 = line status).
    pub fn with_registers(mut make: impl FnMut(u16) -> T) -> SerialPort<T> {
        SerialPort {
            data: make(0),
            int_en: make(1),
            fifo_ctrl: make(2),
            line_ctrl: make(3),
            modem_ctrl: make(4),
            line_sts: ReadOnly::new(make(5)),
        }
    }

    /// Programs 38400 8N1 with FIFOs on and the receive interrupt enabled.
    pub fn init(&mut self) {
        self.int_en.write(0x00.into());
        self.line_ctrl.write(0x80.into());
        self.data.write(0x03.into());
        self.int_en.write(0x00.into());
        self.line_ctrl.write(0x03.into());
        self.fifo_ctrl.write(0xC7.into());
        self.modem_ctrl.write(0x0B.into());
        self.int_en.write(IntEnFlags::RECEIVED.bits().into());
    }

    fn line_sts(&self) -> LineStsFlags {
        LineStsFlags::from_bits_truncate(
            (self.line_sts.read() & 0xFF.into())
                .try_into()
                .unwrap_or(0),
        )
    }

    /// Pops one received byte, if the receiver holds one.
    pub fn receive(&mut self) -> Option<u8> {
        if self.line_sts().contains(LineStsFlags::INPUT_FULL) {
            (self.data.read() & 0xFF.into()).try_into().ok()
        } else {
            None
        }
    }

    /// Sends a raw byte, spinning until the transmitter is empty.
    pub fn send(&mut self, data: u8) {
        while !self.line_sts().contains(LineStsFlags::OUTPUT_EMPTY) {
            core::hint::spin_loop();
        }
        self.data.write(data.into())
    }

    /// Writes a byte, translating `\n` into `\r\n` for the terminal.
    pub fn write(&mut self, b: u8) {
        match b {
            b'\n' => {
                self.send(b'\r');
                self.send(b'\n');
            }
            _ => {
                self.send(b);
            }
        }
    }
}

impl<T> ByteSink for IrqMutex<SerialPort<T>>
where
    T: Io + Send,
    T::Value: From<u8> + TryInto<u8>,
{
    fn put(&self, byte: u8) {
        self.lock().write(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::vec::Vec;

    /// In-memory 16550: transmitted bytes are recorded, received bytes are
    /// served from a queue.
    #[derive(Default)]
    struct FakeUart {
        tx: Vec<u8>,
        rx: Vec<u8>,
        writes: Vec<(u16, u8)>,
    }

    struct FakeReg {
        offset: u16,
        uart: Arc<Mutex<FakeUart>>,
    }

    impl Io for FakeReg {
        type Value = u8;

        fn read(&self) -> u8 {
            let mut uart = self.uart.lock().unwrap();
            match self.offset {
                0 if !uart.rx.is_empty() => uart.rx.remove(0),
                5 => {
                    let input = if uart.rx.is_empty() { 0 } else { 1 };
                    input | (1 << 5)
                }
                _ => 0,
            }
        }

        fn write(&mut self, value: u8) {
            let mut uart = self.uart.lock().unwrap();
            uart.writes.push((self.offset, value));
            if self.offset == 0 {
                uart.tx.push(value);
            }
        }
    }

    fn port(uart: &Arc<Mutex<FakeUart>>) -> SerialPort<FakeReg> {
        SerialPort::with_registers(|offset| FakeReg {
            offset,
            uart: Arc::clone(uart),
        })
    }

    #[test]
    fn test_write_translates_newline() {
        let uart = Arc::new(Mutex::new(FakeUart::default()));
        let mut serial = port(&uart);
        serial.write(b'a');
        serial.write(b'\n');
        assert_eq!(uart.lock().unwrap().tx, b"a\r\n");
    }

    #[test]
    fn test_receive_reads_only_when_input_full() {
        let uart = Arc::new(Mutex::new(FakeUart::default()));
        let mut serial = port(&uart);
        assert_eq!(serial.receive(), None);

        uart.lock().unwrap().rx.push(b'q');
        assert_eq!(serial.receive(), Some(b'q'));
    }

    #[test]
    fn test_init_enables_receive_interrupt() {
        let uart = Arc::new(Mutex::new(FakeUart::default()));
        let mut serial = port(&uart);
        serial.init();
        let uart = uart.lock().unwrap();
        assert_eq!(uart.writes.last(), Some(&(1, 0x01)));
    }

    #[test]
    fn test_receive_interrupt_feeds_console() {
        use crate::components::tty::Console;
        use crate::drivers::serial::handle_interrupt;
        use crate::scheduler::HostScheduler;

        let uart = Arc::new(Mutex::new(FakeUart::default()));
        let serial = IrqMutex::new(port(&uart));
        let console = Console::new(&serial, HostScheduler::new());

        uart.lock().unwrap().rx.extend_from_slice(b"hi\r");
        handle_interrupt(&serial, &console);

        // Echoed through the same port, newline expanded.
        assert_eq!(uart.lock().unwrap().tx, b"hi\r\n");
        let mut buf = [0u8; 8];
        assert_eq!(console.read(&mut buf[..]), Ok(3));
        assert_eq!(&buf[..3], b"hi\n");
    }
}
