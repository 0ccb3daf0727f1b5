/*
 * System Call Handlers
 *
 * Console syscalls. Each handler validates what userspace passed, performs
 * the operation and returns the result or a negative error code.
 *
 * User pointers are range-checked here before a `UserSlice` is built over
 * them; the console then copies byte by byte and stops at the first byte
 * that faults.
 */

use crate::components::top::{ProcessTable, TopReport};
use crate::components::tty::Console;
use crate::drivers::ByteSink;
use crate::io::uaccess::{USER_SPACE_END, UserSlice, UserSliceMut};
use crate::io::Errno;
use crate::scheduler::Scheduler;

use super::numbers::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO};

/// Validate a user pointer
///
/// Checks that a pointer from userspace is:
/// - Not NULL
/// - Within userspace address range (< 0x0000_8000_0000_0000)
/// - Does not overflow when adding count
pub(super) fn validate_user_ptr<T>(ptr: *const T, count: usize) -> Result<(), Errno> {
    let addr = ptr as usize;
    if addr == 0 || addr >= USER_SPACE_END {
        return Err(Errno::EFAULT);
    }
    let size = count
        .checked_mul(core::mem::size_of::<T>())
        .ok_or(Errno::EFAULT)?;
    match addr.checked_add(size) {
        Some(end) if end <= USER_SPACE_END => Ok(()),
        _ => Err(Errno::EFAULT),
    }
}

fn into_ret(result: Result<usize, Errno>) -> isize {
    match result {
        Ok(n) => n as isize,
        Err(err) => err.as_syscall_ret(),
    }
}

/// Read from the console.
///
/// # Safety
///
/// `buf..buf + count` must be mapped writable in the current address space
/// if it passes validation.
pub unsafe fn sys_read<U: ByteSink, S: Scheduler>(
    console: &Console<U, S>,
    fd: i32,
    buf: *mut u8,
    count: usize,
) -> isize {
    if fd != STDIN_FILENO {
        return Errno::EBADF.as_syscall_ret();
    }
    if let Err(err) = validate_user_ptr(buf, count) {
        return err.as_syscall_ret();
    }
    // SAFETY: range validated above, mapping guaranteed by the caller.
    let mut dst = unsafe { UserSliceMut::new(buf, count) };
    into_ret(console.read(&mut dst))
}

/// Write to the console.
///
/// # Safety
///
/// `buf..buf + count` must be mapped in the current address space if it
/// passes validation.
pub unsafe fn sys_write<U: ByteSink, S: Scheduler>(
    console: &Console<U, S>,
    fd: i32,
    buf: *const u8,
    count: usize,
) -> isize {
    if fd != STDOUT_FILENO && fd != STDERR_FILENO {
        return Errno::EBADF.as_syscall_ret();
    }
    if let Err(err) = validate_user_ptr(buf, count) {
        return err.as_syscall_ret();
    }
    // SAFETY: range validated above, mapping guaranteed by the caller.
    let src = unsafe { UserSlice::new(buf, count) };
    into_ret(Ok(console.write(&src)))
}

/// Print the command history followed by entry `id` on the console.
pub fn sys_history<U: ByteSink, S: Scheduler>(console: &Console<U, S>, id: isize) -> isize {
    into_ret(console.print_history(id).map(|()| 0))
}

/// Fill `report` with a process status snapshot.
pub fn sys_top<P: ProcessTable + ?Sized>(procs: &P, report: &mut TopReport) -> isize {
    into_ret(procs.top(report).map(|()| 0))
}
