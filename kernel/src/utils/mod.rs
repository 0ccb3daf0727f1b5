/*
 * Kernel Utilities
 *
 * Formatted output onto a byte sink, the kernel logger and the kernel shell.
 */

pub mod logger;
pub mod ui;
pub mod writer;

pub use self::writer::SinkWriter;
