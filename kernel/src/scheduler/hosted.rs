/*
 * Hosted Scheduler Fabric
 *
 * `Scheduler` implementation for running the console on top of OS threads:
 * a mutex-protected table of per-channel wake generations and one condition
 * variable that every blocked reader waits on.
 *
 * It models a single user process. `kill` marks that process for
 * termination and wakes all of its blocked threads, which is how a reader
 * stuck in read() gets unblocked.
 */

use std::collections::BTreeMap;
use std::sync::{Condvar, Mutex, MutexGuard};

use super::io_wait::{IoChannel, Scheduler, WaitTicket};

#[derive(Default)]
struct HostState {
    /// Wake count per channel.
    generations: BTreeMap<IoChannel, u64>,
    /// Threads currently inside `block`.
    blocked: usize,
    killed: bool,
    procdumps: usize,
}

#[derive(Default)]
pub struct HostScheduler {
    state: Mutex<HostState>,
    wakeup: Condvar,
}

impl HostScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        // A panicking test thread must not wedge the others.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mark the process for termination and wake every blocked thread.
    pub fn kill(&self) {
        self.state().killed = true;
        self.wakeup.notify_all();
        log::debug!("hosted: process killed");
    }

    /// Clear the termination mark.
    pub fn revive(&self) {
        self.state().killed = false;
    }

    /// Number of threads currently blocked in `block`.
    pub fn blocked_count(&self) -> usize {
        self.state().blocked
    }

    /// Number of control-P dumps requested so far.
    pub fn procdump_count(&self) -> usize {
        self.state().procdumps
    }
}

impl Scheduler for HostScheduler {
    fn prepare_to_wait(&self, channel: IoChannel) -> WaitTicket {
        let generation = self.state().generations.get(&channel).copied().unwrap_or(0);
        WaitTicket { channel, generation }
    }

    fn block(&self, ticket: WaitTicket) {
        let mut state = self.state();
        state.blocked += 1;
        while !state.killed
            && state.generations.get(&ticket.channel).copied().unwrap_or(0) == ticket.generation
        {
            state = self
                .wakeup
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        state.blocked -= 1;
    }

    fn wake_io_waiters(&self, channel: IoChannel) {
        *self.state().generations.entry(channel).or_insert(0) += 1;
        self.wakeup.notify_all();
    }

    fn current_killed(&self) -> bool {
        self.state().killed
    }

    fn procdump(&self) {
        self.state().procdumps += 1;
        log::info!("hosted: procdump requested");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_wake_before_block_is_not_lost() {
        let sched = HostScheduler::new();
        let ticket = sched.prepare_to_wait(IoChannel::Serial(0));
        sched.wake_io_waiters(IoChannel::Serial(0));
        // Returns immediately: the channel moved past the ticket.
        sched.block(ticket);
        assert_eq!(sched.blocked_count(), 0);
    }

    #[test]
    fn test_wake_on_other_channel_does_not_release() {
        let sched = Arc::new(HostScheduler::new());
        let ticket = sched.prepare_to_wait(IoChannel::Serial(0));

        let waiter = {
            let sched = Arc::clone(&sched);
            thread::spawn(move || sched.block(ticket))
        };
        while sched.blocked_count() == 0 {
            thread::yield_now();
        }
        sched.wake_io_waiters(IoChannel::Serial(1));
        assert_eq!(sched.blocked_count(), 1);

        sched.wake_io_waiters(IoChannel::Serial(0));
        waiter.join().unwrap();
        assert_eq!(sched.blocked_count(), 0);
    }

    #[test]
    fn test_kill_releases_blocked_thread() {
        let sched = Arc::new(HostScheduler::new());
        let ticket = sched.prepare_to_wait(IoChannel::Serial(0));

        let waiter = {
            let sched = Arc::clone(&sched);
            thread::spawn(move || {
                sched.block(ticket);
                sched.current_killed()
            })
        };
        while sched.blocked_count() == 0 {
            thread::yield_now();
        }
        sched.kill();
        assert!(waiter.join().unwrap());
    }
}
