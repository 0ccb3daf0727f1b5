/*
 * Scheduler Fabric Interface
 *
 * The console never talks to the scheduler directly. It uses the
 * `Scheduler` trait for the three things it needs from the process fabric:
 *
 * - sleeping on a wait channel until an interrupt wakes it
 * - learning that the calling process was killed while it slept
 * - asking for a process-list dump (control-P)
 *
 * The kernel implements the trait on top of its thread scheduler. The `std`
 * feature provides `HostScheduler`, a threaded implementation built on a
 * mutex and condition variable.
 */

pub mod io_wait;

#[cfg(any(test, feature = "std"))]
pub mod hosted;

pub use io_wait::{IoChannel, Scheduler, WaitTicket};

#[cfg(any(test, feature = "std"))]
pub use hosted::HostScheduler;
