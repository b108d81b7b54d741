use super::{InputState, UserData};
use crate::error::Position;

/// A cursor over the raw octets of a materialized byte buffer.
///
/// Mirrors [`CharState`][super::CharState] item for item, except newline
/// counting keys off the single byte `b'\n'` rather than a decoded `char`
/// (grounded in `examples/original_source/states/bytestate/state.go`, the
/// byte-flavored twin of the rune state).
#[derive(Debug, Clone)]
pub struct ByteState<U = ()> {
    seq: Vec<u8>,
    pos: Position,
    user_data: U,
}

impl<U: Default> ByteState<U> {
    /// Build a fresh cursor over `input`, starting at [`Position::START`].
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        ByteState {
            seq: input.into(),
            pos: Position::START,
            user_data: U::default(),
        }
    }
}

impl<U> ByteState<U> {
    /// The full input, unaffected by the cursor's progress.
    pub fn source(&self) -> &[u8] {
        &self.seq
    }

    /// The input from the current position onward, for primitives (like
    /// `regex`) that need to anchor a pattern against the remaining bytes.
    pub fn remaining(&self) -> &[u8] {
        &self.seq[self.pos.index..]
    }
}

impl<U: Clone> InputState for ByteState<U> {
    type Item = u8;

    fn peek(&self) -> Option<u8> {
        self.seq.get(self.pos.index).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let item = self.peek()?;
        self.pos.advance(item == b'\n');
        Some(item)
    }

    fn save(&self) -> Position {
        self.pos
    }

    fn restore(&mut self, position: Position) {
        self.pos = position;
    }

    fn eof_offset(&self) -> usize {
        self.seq.len() - self.pos.index
    }
}

impl<U: Clone> UserData<U> for ByteState<U> {
    fn put(&mut self, value: U) {
        self.user_data = value;
    }

    fn get(&self) -> U {
        self.user_data.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_updates_line_and_column() {
        let mut s: ByteState = ByteState::new(&b"a\nb"[..]);
        assert_eq!(s.advance(), Some(b'a'));
        assert_eq!(s.advance(), Some(b'\n'));
        assert_eq!(s.position(), Position { index: 2, line: 1, column: 0 });
        assert_eq!(s.advance(), Some(b'b'));
        assert_eq!(s.advance(), None);
    }

    #[test]
    fn restore_is_identity_on_save() {
        let mut s: ByteState = ByteState::new(&b"abc"[..]);
        s.advance();
        let saved = s.save();
        s.advance();
        s.restore(saved);
        assert_eq!(s.peek(), Some(b'b'));
    }
}
