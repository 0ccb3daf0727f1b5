/*
 * Input/Output System
 *
 * Register-level I/O used by the UART driver, the character device
 * abstraction the console plugs into, and the user-memory copy interface
 * that read()/write() move bytes through.
 */

pub mod device;
pub mod pio;
pub mod uaccess;

pub use device::{Device, Errno, S_IFCHR, S_IFMT, Stat};
#[cfg(target_arch = "x86_64")]
pub use pio::Pio;
pub use pio::{Io, ReadOnly};
pub use uaccess::{CopyIn, CopyOut};
