/*
 * Kernel Components
 *
 * - tty: the serial console line discipline
 * - top: process status report handed to the status CLI
 */

pub mod top;
pub mod tty;
