/*
 * Generic I/O Wait Queue Interface
 *
 * Blocking I/O is expressed with wait channels. A reader that finds no data:
 *
 * 1. registers on the channel with `prepare_to_wait` while it still holds
 *    the lock protecting the data,
 * 2. releases that lock,
 * 3. calls `block` with the ticket it got back.
 *
 * Because registration happens under the data lock, a wake issued by the
 * interrupt handler after the lock is released is never lost: `block`
 * returns immediately if the channel was woken since the ticket was taken.
 * Wakes are broadcasts and carry no data, so the reader must re-check its
 * condition after every return from `block`.
 */

/// I/O channel identifier
///
/// Threads wait on channels, and interrupts wake threads on channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IoChannel {
    /// Serial port receive side (COM1=0, COM2=1)
    Serial(u8),
}

/// Proof of registration on a wait channel.
///
/// `generation` is the channel's wake count at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct WaitTicket {
    pub channel: IoChannel,
    pub generation: u64,
}

/// Process/scheduler services the console depends on.
pub trait Scheduler: Send + Sync {
    /// Register the calling thread on `channel`.
    ///
    /// Called with the caller's data lock held; must not block.
    fn prepare_to_wait(&self, channel: IoChannel) -> WaitTicket;

    /// Block the calling thread until `ticket.channel` has been woken since
    /// the ticket was issued, or until the calling process is killed.
    fn block(&self, ticket: WaitTicket);

    /// Wake every thread waiting on `channel`. IRQ-safe.
    fn wake_io_waiters(&self, channel: IoChannel);

    /// Whether the calling process has been marked for termination.
    fn current_killed(&self) -> bool;

    /// Print the process list to the console (control-P).
    fn procdump(&self);
}

impl<S: Scheduler + ?Sized> Scheduler for &S {
    fn prepare_to_wait(&self, channel: IoChannel) -> WaitTicket {
        (**self).prepare_to_wait(channel)
    }

    fn block(&self, ticket: WaitTicket) {
        (**self).block(ticket)
    }

    fn wake_io_waiters(&self, channel: IoChannel) {
        (**self).wake_io_waiters(channel)
    }

    fn current_killed(&self) -> bool {
        (**self).current_killed()
    }

    fn procdump(&self) {
        (**self).procdump()
    }
}
