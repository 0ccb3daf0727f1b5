/*
 * x86_64 Support
 *
 * Only interrupt control is needed by the console.
 */

pub mod interrupts;
