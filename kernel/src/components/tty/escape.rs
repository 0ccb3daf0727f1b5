/*
 * Escape Sequence Recognizer
 *
 * Turns the cursor-key sequences ESC [ A (up) and ESC [ B (down) into recall
 * events. Every other byte passes through untouched.
 */

/// Position inside an ESC [ A/B sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EscapeState {
    #[default]
    Idle,
    SawEscape,
    SawBracket,
}

/// History navigation key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
}

/// What the line discipline should do with a received byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recognized {
    /// Part of an escape sequence; drop it.
    Swallowed,
    /// A complete cursor-key sequence.
    Arrow(ArrowKey),
    /// Not part of a sequence; dispatch it normally.
    Byte(u8),
}

#[derive(Debug, Default)]
pub struct EscapeRecognizer {
    state: EscapeState,
}

impl EscapeRecognizer {
    pub const fn new() -> Self {
        Self {
            state: EscapeState::Idle,
        }
    }

    pub fn state(&self) -> EscapeState {
        self.state
    }

    /// Called when the dispatcher sees ESC.
    pub fn begin(&mut self) {
        self.state = EscapeState::SawEscape;
    }

    /// Runs one received byte through the recognizer.
    ///
    /// A byte that breaks an open sequence resets to `Idle` and is passed on,
    /// so a stray ESC never eats the next keystroke.
    pub fn feed(&mut self, byte: u8) -> Recognized {
        match (self.state, byte) {
            (EscapeState::SawEscape, b'[') => {
                self.state = EscapeState::SawBracket;
                Recognized::Swallowed
            }
            (EscapeState::SawBracket, b'A') => {
                self.state = EscapeState::Idle;
                Recognized::Arrow(ArrowKey::Up)
            }
            (EscapeState::SawBracket, b'B') => {
                self.state = EscapeState::Idle;
                Recognized::Arrow(ArrowKey::Down)
            }
            _ => {
                self.state = EscapeState::Idle;
                Recognized::Byte(byte)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(rec: &mut EscapeRecognizer, bytes: &[u8]) -> std::vec::Vec<Recognized> {
        bytes.iter().map(|&b| rec.feed(b)).collect()
    }

    #[test]
    fn test_arrow_sequences() {
        let mut rec = EscapeRecognizer::new();
        rec.begin();
        assert_eq!(
            feed_all(&mut rec, b"[A"),
            [Recognized::Swallowed, Recognized::Arrow(ArrowKey::Up)]
        );
        assert_eq!(rec.state(), EscapeState::Idle);

        rec.begin();
        assert_eq!(
            feed_all(&mut rec, b"[B"),
            [Recognized::Swallowed, Recognized::Arrow(ArrowKey::Down)]
        );
    }

    #[test]
    fn test_plain_bytes_pass_through_when_idle() {
        let mut rec = EscapeRecognizer::new();
        assert_eq!(
            feed_all(&mut rec, b"[A"),
            [Recognized::Byte(b'['), Recognized::Byte(b'A')]
        );
    }

    #[test]
    fn test_broken_sequence_resets_and_passes_byte() {
        let mut rec = EscapeRecognizer::new();
        rec.begin();
        assert_eq!(rec.feed(b'x'), Recognized::Byte(b'x'));
        assert_eq!(rec.state(), EscapeState::Idle);

        rec.begin();
        assert_eq!(rec.feed(b'['), Recognized::Swallowed);
        assert_eq!(rec.feed(b'C'), Recognized::Byte(b'C'));
        assert_eq!(rec.state(), EscapeState::Idle);
    }
}
