/*
 * System Call Numbers
 *
 * Console syscalls. Standard I/O keeps the Linux numbers; the console
 * queries use the custom range (>= 1000).
 *
 * Arguments go in RDI, RSI, RDX and the return value comes back in RAX
 * (negative = error code).
 */

/// Read from file descriptor
///
/// Arguments: (fd: i32, buf: *mut u8, count: usize) -> isize
/// Returns: number of bytes read, or negative error code
pub const SYS_READ: usize = 0;

/// Write to file descriptor
///
/// Arguments: (fd: i32, buf: *const u8, count: usize) -> isize
/// Returns: number of bytes written, or negative error code
pub const SYS_WRITE: usize = 1;

/// Print the command history and one entry of it on the console
///
/// Arguments: (id: isize) -> isize
/// Returns: 0, or -EINVAL if `id` is not a history slot
pub const SYS_HISTORY: usize = 1001;

/// Process status snapshot
///
/// Arguments: (report: *mut TopReport) -> isize
/// Returns: 0, or negative error code
pub const SYS_TOP: usize = 1002;

/// File descriptors wired to the console.
pub const STDIN_FILENO: i32 = 0;
pub const STDOUT_FILENO: i32 = 1;
pub const STDERR_FILENO: i32 = 2;
