//! Input cursors: the mutable, rewindable state every parser runs over.
//!
//! Three flavors share one contract ([`InputState`]): [`CharState`] walks
//! Unicode scalar values, [`ByteState`] walks raw octets, and [`TokenState`]
//! walks a pre-lexed `&[Token]` slice. Saving a position is a cheap copy;
//! restoring never fails — this is the mechanism that makes [`try_`
//! ][crate::combinator::try_]/backtracking possible.

mod byte_state;
mod char_state;
mod token_state;

pub use byte_state::ByteState;
pub use char_state::CharState;
pub use token_state::{Token, TokenState};

use crate::error::Position;

/// A rewindable cursor over a sequence of `Item`s.
///
/// Implementors must uphold:
/// - `0 <= position().index <= len`, and `position().index == len` iff the
///   input is exhausted;
/// - `restore(save())` is the identity;
/// - a failed [`advance_if`][InputState::advance_if] leaves the cursor
///   unchanged.
pub trait InputState {
    /// The element type this cursor walks.
    type Item: Clone;

    /// Look at the next item without consuming it.
    fn peek(&self) -> Option<Self::Item>;

    /// Consume and return the next item, advancing the cursor.
    fn advance(&mut self) -> Option<Self::Item>;

    /// Consume the next item only if it satisfies `pred`; otherwise the
    /// cursor is left untouched.
    fn advance_if(&mut self, pred: impl FnOnce(&Self::Item) -> bool) -> Option<Self::Item> {
        let saved = self.save();
        match self.advance() {
            Some(item) if pred(&item) => Some(item),
            _ => {
                self.restore(saved);
                None
            }
        }
    }

    /// Snapshot the current position for later [`restore`][InputState::restore].
    fn save(&self) -> Position;

    /// Rewind to a previously [`save`][InputState::save]d position.
    fn restore(&mut self, position: Position);

    /// The current position (equivalent to `save`, offered for readability
    /// at call sites that aren't about to restore).
    fn position(&self) -> Position {
        self.save()
    }

    /// Number of items remaining before end of input.
    fn eof_offset(&self) -> usize;

    /// `true` once the cursor has consumed every item.
    fn is_eof(&self) -> bool {
        self.eof_offset() == 0
    }
}

/// Per-state user-data slot: an opaque value the grammar may carry alongside
/// the cursor. Lifetime is that of the state.
pub trait UserData<U: Clone> {
    /// Replace the carried value.
    fn put(&mut self, value: U);
    /// Read the carried value.
    fn get(&self) -> U;
}
