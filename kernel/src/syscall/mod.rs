/*
 * System Call Interface
 *
 * Console-facing part of the syscall layer. The architecture entry stub
 * saves the user registers and calls `dispatch` with the syscall number
 * (RAX) and the first three arguments (RDI, RSI, RDX); whatever `dispatch`
 * returns goes back to userspace in RAX.
 *
 * Unknown numbers return -ENOSYS.
 */

pub mod handlers;
pub mod numbers;

use crate::components::top::{ProcessTable, TopReport};
use crate::components::tty::Console;
use crate::drivers::ByteSink;
use crate::io::Errno;
use crate::scheduler::Scheduler;

pub use handlers::{sys_history, sys_read, sys_top, sys_write};
pub use numbers::*;

/// Route one system call.
///
/// # Safety
///
/// Pointer arguments that pass range validation must be mapped in the
/// current address space, as for the individual handlers.
pub unsafe fn dispatch<U, S, P>(
    console: &Console<U, S>,
    procs: &P,
    num: usize,
    args: [usize; 3],
) -> isize
where
    U: ByteSink,
    S: Scheduler,
    P: ProcessTable + ?Sized,
{
    let [arg0, arg1, arg2] = args;
    log::trace!("syscall: {} ({:#x}, {:#x}, {:#x})", num, arg0, arg1, arg2);

    match num {
        // SAFETY: forwarded from our caller.
        SYS_READ => unsafe { sys_read(console, arg0 as i32, arg1 as *mut u8, arg2) },
        // SAFETY: forwarded from our caller.
        SYS_WRITE => unsafe { sys_write(console, arg0 as i32, arg1 as *const u8, arg2) },
        SYS_HISTORY => sys_history(console, arg0 as isize),
        // SAFETY: forwarded from our caller.
        SYS_TOP => unsafe { top_to_user(procs, arg0 as *mut TopReport) },
        _ => {
            log::debug!("syscall: unknown number {}", num);
            Errno::ENOSYS.as_syscall_ret()
        }
    }
}

/// `sys_top` into a report living in user memory.
unsafe fn top_to_user<P: ProcessTable + ?Sized>(procs: &P, dst: *mut TopReport) -> isize {
    if let Err(err) = handlers::validate_user_ptr(dst, 1) {
        return err.as_syscall_ret();
    }
    if !dst.is_aligned() {
        return Errno::EFAULT.as_syscall_ret();
    }

    let mut report = TopReport::new();
    let ret = sys_top(procs, &mut report);
    if ret == 0 {
        // SAFETY: validated and aligned above, mapping guaranteed by the caller.
        unsafe { dst.write(report) };
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::top::{ProcEntry, ProcState};
    use crate::scheduler::HostScheduler;
    use crate::testing::RecordingSink;
    use core::mem::MaybeUninit;

    struct OneProc;

    impl ProcessTable for OneProc {
        fn top(&self, report: &mut TopReport) -> Result<(), Errno> {
            report.uptime_secs = 1;
            report.record(ProcEntry::new("init", 1, 0, ProcState::Running))
        }
    }

    fn console() -> Console<RecordingSink, HostScheduler> {
        Console::new(RecordingSink::new(), HostScheduler::new())
    }

    #[test]
    fn test_read_and_write_through_dispatch() {
        let console = console();
        for &byte in b"hi\n" {
            console.interrupt(byte);
        }
        console.uart().take();

        let mut buf = [0u8; 8];
        let ret = unsafe {
            dispatch(&console, &OneProc, SYS_READ, [0, buf.as_mut_ptr() as usize, buf.len()])
        };
        assert_eq!(ret, 3);
        assert_eq!(&buf[..3], b"hi\n");

        let msg = b"ok\n";
        let ret = unsafe {
            dispatch(&console, &OneProc, SYS_WRITE, [1, msg.as_ptr() as usize, msg.len()])
        };
        assert_eq!(ret, 3);
        assert_eq!(console.uart().take(), b"ok\n");
    }

    #[test]
    fn test_bad_descriptor_and_pointer() {
        let console = console();
        let msg = b"x";
        unsafe {
            assert_eq!(
                sys_write(&console, 5, msg.as_ptr(), 1),
                Errno::EBADF.as_syscall_ret()
            );
            assert_eq!(
                sys_write(&console, 1, core::ptr::null(), 1),
                Errno::EFAULT.as_syscall_ret()
            );
            assert_eq!(
                sys_write(&console, 1, 0xffff_8000_0000_1000 as *const u8, 1),
                Errno::EFAULT.as_syscall_ret()
            );
            let mut buf = [0u8; 4];
            assert_eq!(
                sys_read(&console, 1, buf.as_mut_ptr(), buf.len()),
                Errno::EBADF.as_syscall_ret()
            );
        }
        assert!(console.uart().take().is_empty());
    }

    #[test]
    fn test_history_syscall() {
        let console = console();
        for &byte in b"ls\n" {
            console.interrupt(byte);
        }
        console.uart().take();

        let ret = unsafe { dispatch(&console, &OneProc, SYS_HISTORY, [0, 0, 0]) };
        assert_eq!(ret, 0);
        assert_eq!(console.uart().take_string(), "ls\nrequested command: ls\n");

        assert_eq!(sys_history(&console, 16), -22);
        assert_eq!(sys_history(&console, -1), -22);
        assert!(console.uart().take().is_empty());
    }

    #[test]
    fn test_top_syscall_fills_user_report() {
        let console = console();
        let mut report = MaybeUninit::<TopReport>::uninit();
        let ret = unsafe {
            dispatch(&console, &OneProc, SYS_TOP, [report.as_mut_ptr() as usize, 0, 0])
        };
        assert_eq!(ret, 0);

        let report = unsafe { report.assume_init() };
        assert_eq!(report.total, 1);
        assert_eq!(report.running, 1);
        assert_eq!(report.entries[0].name.as_str(), "init");
    }

    #[test]
    fn test_unknown_syscall() {
        let console = console();
        let ret = unsafe { dispatch(&console, &OneProc, 4242, [0, 0, 0]) };
        assert_eq!(ret, Errno::ENOSYS.as_syscall_ret());
    }
}
