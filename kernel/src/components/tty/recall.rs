/*
 * History Navigator
 *
 * Arrow-key navigation state over the history store. `cursor` is the slot
 * the next "up" shows; "up" walks towards older lines and "down" walks back,
 * but never further than the number of "up" presses since the last commit.
 *
 * The navigator only decides which slot to replay and advances its own
 * counters. Erasing the current line and replaying the bytes is done by the
 * console while it holds its lock.
 */

use core::fmt;

/// Why a recall key did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecallError {
    /// Nothing has been recorded yet.
    EmptyHistory,
    /// Already showing the oldest recorded line.
    OldestReached,
    /// No "up" press to walk back from.
    NothingToRewind,
}

impl fmt::Display for RecallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecallError::EmptyHistory => write!(f, "history is empty"),
            RecallError::OldestReached => write!(f, "no older history entry"),
            RecallError::NothingToRewind => write!(f, "no newer history entry"),
        }
    }
}

#[derive(Debug)]
pub struct HistoryNavigator {
    /// Slot shown by the next "up"; -1 once the oldest line of a store that
    /// has not wrapped yet has been shown.
    cursor: isize,
    up_count: usize,
    down_count: usize,
}

impl HistoryNavigator {
    pub const fn new() -> Self {
        Self {
            cursor: -1,
            up_count: 0,
            down_count: 0,
        }
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn up_count(&self) -> usize {
        self.up_count
    }

    pub fn down_count(&self) -> usize {
        self.down_count
    }

    /// A line was recorded in `slot`: restart navigation from it.
    pub fn on_append(&mut self, slot: usize) {
        self.cursor = slot as isize;
        self.up_count = 0;
        self.down_count = 0;
    }

    /// Pick the slot for an "up" press and advance towards older lines.
    ///
    /// `len` is the number of recorded lines, `capacity` the slot count.
    pub fn up(&mut self, len: usize, capacity: usize) -> Result<usize, RecallError> {
        if len == 0 {
            return Err(RecallError::EmptyHistory);
        }
        let full = len == capacity;
        let allowed = if full {
            self.up_count < len
        } else {
            (0..len as isize).contains(&self.cursor)
        };
        if !allowed {
            return Err(RecallError::OldestReached);
        }

        let slot = self.cursor as usize;
        self.up_count += 1;
        self.down_count = self.up_count;
        self.cursor -= 1;
        if full && self.cursor < 0 {
            self.cursor = capacity as isize - 1;
        }
        Ok(slot)
    }

    /// Pick the slot for a "down" press and advance towards newer lines.
    pub fn down(&mut self, len: usize, capacity: usize) -> Result<usize, RecallError> {
        if self.down_count == 0 {
            return Err(RecallError::NothingToRewind);
        }
        if self.cursor < 0 {
            self.cursor = 0;
        }

        let slot = self.cursor as usize;
        self.down_count -= 1;
        self.cursor += 1;
        if len == capacity {
            if self.cursor > capacity as isize - 1 {
                self.cursor = 0;
            }
        } else if self.cursor > len as isize - 1 {
            // Newest recorded line; slots past it were never written.
            self.cursor = len as isize - 1;
        }
        Ok(slot)
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}
