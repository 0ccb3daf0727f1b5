/*
 * Device Abstraction Layer
 *
 * Character device trait the console is registered under, plus the errno
 * subset the console and its syscall shims report.
 */

use core::fmt;

use super::uaccess::{CopyIn, CopyOut};

/// Character device interface
///
/// Buffers cross the user/kernel boundary through [`CopyIn`] / [`CopyOut`],
/// so a bad user address shows up as a short transfer instead of a fault.
pub trait Device: Send + Sync {
    /// Read up to `dst.len()` bytes into `dst`
    ///
    /// May block until data is available (for TTYs).
    fn read(&self, dst: &mut dyn CopyOut) -> Result<usize, Errno>;

    /// Write `src.len()` bytes from `src`
    fn write(&self, src: &dyn CopyIn) -> Result<usize, Errno>;

    /// Device control operation (ioctl)
    fn ioctl(&self, request: u32, arg: usize) -> Result<i32, Errno>;

    /// Check if device is a TTY
    fn is_tty(&self) -> bool {
        false
    }

    /// Get device metadata
    fn stat(&self) -> Stat;

    /// Seek to position (default: not seekable)
    fn seek(&self, _offset: i64, _whence: i32) -> Result<i64, Errno> {
        Err(Errno::ESPIPE)
    }
}

/// POSIX errno values
///
/// Subset of standard POSIX error codes for syscall compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Errno {
    EPERM = 1,   // Operation not permitted
    EINTR = 4,   // Interrupted system call
    EIO = 5,     // I/O error
    EBADF = 9,   // Bad file descriptor
    EAGAIN = 11, // Try again
    EFAULT = 14, // Bad address
    EINVAL = 22, // Invalid argument
    ENOTTY = 25, // Not a typewriter
    ESPIPE = 29, // Illegal seek
    ENOSYS = 38, // Function not implemented
}

impl Errno {
    /// Value returned in RAX by a failing syscall.
    pub fn as_syscall_ret(self) -> isize {
        -(self as i32 as isize)
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Errno::EPERM => "operation not permitted",
            Errno::EINTR => "interrupted system call",
            Errno::EIO => "i/o error",
            Errno::EBADF => "bad file descriptor",
            Errno::EAGAIN => "try again",
            Errno::EFAULT => "bad address",
            Errno::EINVAL => "invalid argument",
            Errno::ENOTTY => "not a typewriter",
            Errno::ESPIPE => "illegal seek",
            Errno::ENOSYS => "function not implemented",
        };
        write!(f, "{:?} ({})", self, msg)
    }
}

/// Minimal stat structure
///
/// Subset of POSIX struct stat, focusing on st_mode for type checking.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Stat {
    pub st_mode: u32,    // File type and mode
    pub st_size: u64,    // File size in bytes
    pub st_blksize: u64, // Block size for I/O
    pub st_blocks: u64,  // Number of 512B blocks allocated
}

// File type constants (POSIX)
pub const S_IFMT: u32 = 0o170000; // File type mask
pub const S_IFCHR: u32 = 0o020000; // Character device

/// Check if mode indicates a character device
#[inline]
#[allow(non_snake_case)]
pub fn S_ISCHR(mode: u32) -> bool {
    (mode & S_IFMT) == S_IFCHR
}
