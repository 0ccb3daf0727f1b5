/*
 * Interrupt-Safe Spin Lock
 *
 * A spin::Mutex that masks local interrupts for as long as the guard is
 * alive. Both the UART ISR and process context take the console lock; without
 * masking, an ISR arriving while a reader on the same CPU holds the lock
 * would spin forever.
 */

use core::ops::{Deref, DerefMut};
use spin::{Mutex, MutexGuard};

use super::DisableInterrupts;

pub struct IrqMutex<T> {
    inner: Mutex<T>,
}

/// Guard returned by [`IrqMutex::lock`].
///
/// Field order matters: the lock is released before interrupts are restored.
pub struct IrqMutexGuard<'a, T> {
    guard: MutexGuard<'a, T>,
    _irq: DisableInterrupts,
}

impl<T> IrqMutex<T> {
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    pub fn lock(&self) -> IrqMutexGuard<'_, T> {
        let irq = DisableInterrupts::new();
        IrqMutexGuard {
            guard: self.inner.lock(),
            _irq: irq,
        }
    }
}

impl<T> Deref for IrqMutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for IrqMutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_is_released_on_drop() {
        let lock = IrqMutex::new(5u32);
        {
            let mut guard = lock.lock();
            *guard += 1;
        }
        assert_eq!(*lock.lock(), 6);
    }
}
