/*
 * Interrupt Management Module
 *
 * Thin wrapper over the x86_64 interrupt flag instructions. The console lock
 * uses `DisableInterrupts` to keep the UART ISR off the CPU while the reader
 * holds the lock.
 */

use x86_64::instructions::interrupts;

/// Enable interrupts globally
pub fn enable() {
    interrupts::enable();
}

/// Disable interrupts globally
pub fn disable() {
    interrupts::disable();
}

/// Check if interrupts are enabled
pub fn are_enabled() -> bool {
    interrupts::are_enabled()
}

/// RAII guard that disables interrupts for its lifetime
///
/// Interrupts are restored to their previous state when the guard is dropped,
/// so guards nest correctly inside an ISR (where they are already off).
pub struct DisableInterrupts {
    were_enabled: bool,
}

impl DisableInterrupts {
    /// Create a new interrupt guard, disabling interrupts
    pub fn new() -> Self {
        let were_enabled = are_enabled();
        if were_enabled {
            disable();
        }
        Self { were_enabled }
    }
}

impl Drop for DisableInterrupts {
    fn drop(&mut self) {
        // Only re-enable if they were enabled before
        if self.were_enabled {
            enable();
        }
    }
}
