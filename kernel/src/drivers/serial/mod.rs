/*
 * Serial Communication Drivers
 *
 * 16550 UART driver. COM1 carries the interactive console, COM2 the kernel
 * log. The COM1 receive interrupt feeds the console line discipline.
 */

use core::convert::TryInto;

use crate::arch::IrqMutex;
use crate::components::tty::Console;
use crate::drivers::ByteSink;
use crate::io::Io;
use crate::scheduler::Scheduler;

pub mod uart_16550;

pub use uart_16550::SerialPort;

#[cfg(target_arch = "x86_64")]
use crate::io::Pio;

/// Console port.
#[cfg(target_arch = "x86_64")]
pub static COM1: IrqMutex<SerialPort<Pio<u8>>> = IrqMutex::new(SerialPort::<Pio<u8>>::new(0x3F8));

/// Debug/log port.
#[cfg(target_arch = "x86_64")]
pub static COM2: IrqMutex<SerialPort<Pio<u8>>> = IrqMutex::new(SerialPort::<Pio<u8>>::new(0x2F8));

/// Programs both serial ports. Call before the console or logger is used.
#[cfg(target_arch = "x86_64")]
pub fn init_ports() {
    COM1.lock().init();
    COM2.lock().init();
}

/// UART receive interrupt handler.
///
/// Drains every byte the receiver holds into the console. The port lock is
/// dropped before each byte is handed over, since the console echoes through
/// the same port.
pub fn handle_interrupt<T, U, S>(port: &IrqMutex<SerialPort<T>>, console: &Console<U, S>)
where
    T: Io + Send,
    T::Value: From<u8> + TryInto<u8>,
    U: ByteSink,
    S: Scheduler,
{
    loop {
        let received = port.lock().receive();
        match received {
            Some(byte) => console.interrupt(byte),
            None => break,
        }
    }
}
