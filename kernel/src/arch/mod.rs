/*
 * Architecture Abstraction Layer
 *
 * Interrupt masking used by the console lock. On bare-metal x86_64 the lock
 * is taken with interrupts disabled so the UART receive ISR can never spin
 * on a lock held by the reader it interrupted. Hosted builds have no
 * interrupts to mask and get a no-op guard.
 */

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub mod x86_64;

pub mod irq_lock;

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub use self::x86_64::interrupts::DisableInterrupts;

pub use irq_lock::{IrqMutex, IrqMutexGuard};

/// Interrupt guard for targets without maskable interrupts.
#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
pub struct DisableInterrupts;

#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
impl DisableInterrupts {
    pub fn new() -> Self {
        DisableInterrupts
    }
}
