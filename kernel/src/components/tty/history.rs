/*
 * Command History Store
 *
 * The last H committed lines, kept in a fixed ring of slots. New lines go
 * into `next_slot`; once all slots are used the oldest line is overwritten.
 * Lines are stored without their terminator.
 */

use core::fmt;

use heapless::Vec;

use crate::io::Errno;

/// One recorded line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryEntry<const L: usize> {
    bytes: Vec<u8, L>,
}

impl<const L: usize> HistoryEntry<L> {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl<const L: usize> fmt::Display for HistoryEntry<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.bytes.iter() {
            fmt::Write::write_char(f, byte as char)?;
        }
        Ok(())
    }
}

pub struct HistoryStore<const H: usize, const L: usize> {
    entries: [HistoryEntry<L>; H],
    next_slot: usize,
    count: usize,
}

impl<const H: usize, const L: usize> HistoryStore<H, L> {
    pub fn new() -> Self {
        Self {
            entries: core::array::from_fn(|_| HistoryEntry::new()),
            next_slot: 0,
            count: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        H
    }

    /// Lines recorded so far, saturating at the capacity.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == H
    }

    /// Record a line and return the slot it went into.
    ///
    /// Lines longer than an entry are truncated to the entry capacity.
    pub fn append(&mut self, line: &[u8]) -> usize {
        let slot = self.next_slot;
        let kept = line.len().min(L);
        if kept < line.len() {
            log::warn!(
                "history: line of {} bytes truncated to {}",
                line.len(),
                kept
            );
        }

        let entry = &mut self.entries[slot];
        entry.bytes.clear();
        // Cannot fail: `kept` <= L.
        let _ = entry.bytes.extend_from_slice(&line[..kept]);

        self.next_slot = (slot + 1) % H;
        if self.count < H {
            self.count += 1;
        }
        slot
    }

    /// Entry in `slot`, whether or not it has been written.
    pub fn get(&self, slot: usize) -> Option<&HistoryEntry<L>> {
        self.entries.get(slot)
    }

    /// Written entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry<L>> {
        self.entries[..self.count].iter()
    }

    /// Print every recorded line followed by the entry in slot `id`.
    ///
    /// Fails with `EINVAL`, printing nothing, if `id` is not a slot.
    pub fn query(&self, id: usize, out: &mut dyn fmt::Write) -> Result<(), Errno> {
        let requested = self.get(id).ok_or(Errno::EINVAL)?;
        for entry in self.iter() {
            writeln!(out, "{}", entry).map_err(|_| Errno::EIO)?;
        }
        writeln!(out, "requested command: {}", requested).map_err(|_| Errno::EIO)?;
        Ok(())
    }
}

impl<const H: usize, const L: usize> Default for HistoryStore<H, L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::format;
    use std::string::String;

    #[test]
    fn test_append_fills_slots_in_order() {
        let mut store = HistoryStore::<4, 8>::new();
        assert_eq!(store.append(b"ls"), 0);
        assert_eq!(store.append(b"cat"), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().as_bytes(), b"cat");
        assert!(store.get(2).unwrap().is_empty());
        assert!(store.get(4).is_none());
    }

    #[test]
    fn test_oldest_entry_is_overwritten() {
        let mut store = HistoryStore::<16, 8>::new();
        for i in 1..=17 {
            store.append(format!("cmd{}", i).as_bytes());
        }
        assert!(store.is_full());
        assert_eq!(store.len(), 16);
        assert_eq!(store.get(0).unwrap().as_bytes(), b"cmd17");
        assert_eq!(store.get(15).unwrap().as_bytes(), b"cmd16");
    }

    #[test]
    fn test_long_line_is_truncated() {
        let mut store = HistoryStore::<2, 4>::new();
        store.append(b"abcdefgh");
        assert_eq!(store.get(0).unwrap().as_bytes(), b"abcd");
    }

    #[test]
    fn test_query_prints_all_then_requested() {
        let mut store = HistoryStore::<4, 8>::new();
        store.append(b"echo a");
        store.append(b"ls");

        let mut out = String::new();
        assert_eq!(store.query(0, &mut out), Ok(()));
        assert_eq!(out, "echo a\nls\nrequested command: echo a\n");
    }

    #[test]
    fn test_query_out_of_range_prints_nothing() {
        let mut store = HistoryStore::<4, 8>::new();
        store.append(b"ls");

        let mut out = String::new();
        assert_eq!(store.query(4, &mut out), Err(Errno::EINVAL));
        assert!(out.is_empty());
    }
}
