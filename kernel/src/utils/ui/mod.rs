/*
 * User Interface Utilities
 *
 * The kernel shell that sits on top of the console.
 */

pub mod kshell;

pub use kshell::KShell;
