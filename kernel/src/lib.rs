/*
 * CLUU Console
 *
 * Line discipline for the single serial console of the CLUU kernel.
 *
 * The console turns the raw byte stream coming out of the UART receive
 * interrupt into canonical, line-buffered input for user processes:
 *
 * - in-line editing (backspace/delete, kill-line)
 * - end-of-stream signaling (control-D)
 * - process-list dump trigger (control-P)
 * - command history recall with the arrow keys (ESC [ A / ESC [ B)
 *
 * The interrupt-time producer and the blocking reader share one lock. The
 * reader sleeps on a wait channel supplied by the scheduler fabric and
 * re-checks its condition after every wake.
 *
 * The crate is no_std by default. The `std` feature adds a hosted scheduler
 * fabric built on a mutex and condition variable.
 */

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod arch;
pub mod components;
pub mod config;
pub mod drivers;
pub mod io;
pub mod scheduler;
pub mod syscall;
pub mod utils;

#[cfg(test)]
mod testing;

pub use components::tty::{Console, RecallError};
pub use config::ConsoleConfig;
pub use drivers::ByteSink;
pub use io::Errno;
pub use scheduler::{IoChannel, Scheduler, WaitTicket};
