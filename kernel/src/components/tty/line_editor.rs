/*
 * Line Editor
 *
 * Editing operations on the in-progress line of the input buffer: append
 * with echo, erase one character, kill the whole line. Erasures are echoed
 * as BS SP BS so the character disappears from the terminal.
 */

use super::input::InputBuffer;
use crate::drivers::ByteSink;

/// Control-x
pub const fn ctrl(x: u8) -> u8 {
    x - b'@'
}

pub const CTRL_D: u8 = ctrl(b'D'); // end of file
pub const CTRL_H: u8 = ctrl(b'H'); // backspace
pub const CTRL_P: u8 = ctrl(b'P'); // process list
pub const CTRL_U: u8 = ctrl(b'U'); // kill line
pub const DEL: u8 = 0x7F;
pub const ESC: u8 = 0x1B;

/// Result of offering a byte to the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insert {
    /// NUL, or no room left on the line.
    Dropped,
    /// Stored; the line is still open.
    Buffered,
    /// Stored and the line is complete (newline, end of file, or full).
    LineReady,
}

pub struct LineEditor<'a, U: ByteSink, const N: usize> {
    input: &'a mut InputBuffer<N>,
    out: &'a U,
    echo: bool,
}

impl<'a, U: ByteSink, const N: usize> LineEditor<'a, U, N> {
    pub fn new(input: &'a mut InputBuffer<N>, out: &'a U, echo: bool) -> Self {
        Self { input, out, echo }
    }

    fn put(&self, byte: u8) {
        if self.echo {
            self.out.put_sync(byte);
        }
    }

    /// Overwrite the last character on screen with a space.
    fn backspace(&self) {
        self.put(CTRL_H);
        self.put(b' ');
        self.put(CTRL_H);
    }

    /// Erase one character. No-op at the start of the line.
    pub fn erase_char(&mut self) -> bool {
        if self.input.pop_edit().is_some() {
            self.backspace();
            true
        } else {
            false
        }
    }

    /// Erase back to the start of the line. Returns the number of
    /// characters erased.
    pub fn kill_line(&mut self) -> usize {
        let mut erased = 0;
        while matches!(self.input.last_edit(), Some(byte) if byte != b'\n') {
            self.input.pop_edit();
            self.backspace();
            erased += 1;
        }
        erased
    }

    /// Echo and store an ordinary byte. Carriage return becomes newline.
    pub fn insert(&mut self, byte: u8) -> Insert {
        if byte == 0 || self.input.is_full() {
            return Insert::Dropped;
        }
        let byte = if byte == b'\r' { b'\n' } else { byte };
        self.put(byte);
        self.input.push_edit(byte);

        if byte == b'\n' || byte == CTRL_D || self.input.is_full() {
            Insert::LineReady
        } else {
            Insert::Buffered
        }
    }
}
