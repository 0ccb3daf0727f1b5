/*
 * Console Input Buffer
 *
 * Circular byte store shared by the UART interrupt (producer) and read()
 * (consumer). Three free-running cursors index it modulo the capacity:
 *
 *   r  next byte read() will consume
 *   w  commit cursor: bytes before it belong to complete lines
 *   e  edit cursor: end of the line being typed
 *
 * r <= w <= e and e - r <= N always hold. Only the reader moves r; only the
 * interrupt path moves w and e. Both do so under the console lock.
 */

use heapless::Vec;

pub struct InputBuffer<const N: usize> {
    buf: [u8; N],
    r: usize,
    w: usize,
    e: usize,
}

impl<const N: usize> InputBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            r: 0,
            w: 0,
            e: 0,
        }
    }

    #[inline]
    fn slot(index: usize) -> usize {
        index % N
    }

    /// Whether a committed byte is waiting for the reader.
    pub fn has_committed(&self) -> bool {
        self.r != self.w
    }

    /// Committed bytes not yet consumed.
    pub fn committed_len(&self) -> usize {
        self.w.wrapping_sub(self.r)
    }

    /// Bytes of the line being edited.
    pub fn edit_len(&self) -> usize {
        self.e.wrapping_sub(self.w)
    }

    /// True once unread plus in-progress bytes fill the buffer.
    pub fn is_full(&self) -> bool {
        self.e.wrapping_sub(self.r) >= N
    }

    /// Bytes that can still be appended before the buffer is full.
    pub fn room(&self) -> usize {
        N.saturating_sub(self.e.wrapping_sub(self.r))
    }

    /// Consumes the next committed byte.
    pub fn pop_committed(&mut self) -> Option<u8> {
        if !self.has_committed() {
            return None;
        }
        let byte = self.buf[Self::slot(self.r)];
        self.r = self.r.wrapping_add(1);
        Some(byte)
    }

    /// Gives back the byte just returned by `pop_committed`.
    pub fn unread(&mut self) {
        self.r = self.r.wrapping_sub(1);
    }

    /// Appends a byte at the edit cursor. Returns false if the buffer is full.
    pub fn push_edit(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.buf[Self::slot(self.e)] = byte;
        self.e = self.e.wrapping_add(1);
        true
    }

    /// Last byte of the line being edited.
    pub fn last_edit(&self) -> Option<u8> {
        if self.e == self.w {
            return None;
        }
        Some(self.buf[Self::slot(self.e.wrapping_sub(1))])
    }

    /// Removes the last byte of the line being edited.
    pub fn pop_edit(&mut self) -> Option<u8> {
        let byte = self.last_edit()?;
        self.e = self.e.wrapping_sub(1);
        Some(byte)
    }

    /// Copy of the line being edited (w..e).
    pub fn pending_line(&self) -> Vec<u8, N> {
        let mut line = Vec::new();
        let mut i = self.w;
        while i != self.e {
            // Cannot overflow: e - w <= N.
            let _ = line.push(self.buf[Self::slot(i)]);
            i = i.wrapping_add(1);
        }
        line
    }

    /// Hands the edited line to the reader.
    pub fn commit(&mut self) {
        self.w = self.e;
    }
}

impl<const N: usize> Default for InputBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
