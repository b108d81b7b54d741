//! A monadic parser-combinator core with a precedence-aware
//! expression-parser builder.
//!
//! `parsec` gives you a small algebra of composable, backtracking parsers
//! over an abstract input cursor ([`state`]), the derived combinator
//! vocabulary Parsec users expect ([`combinator`]), concrete stream
//! primitives for characters, bytes, and pre-lexed tokens ([`stream`]), and
//! a generator that compiles a table of operators into a recursive-descent
//! expression parser ([`expression`]).
//!
//! ## Example
//!
//! ```rust
//! use parsec::prelude::*;
//! use parsec::stream::char::{char, digit};
//!
//! let mut paren_digit = mid(char('('), digit(), char(')'));
//! let mut s = CharState::new("(7)");
//! assert_eq!(paren_digit.parse(&mut s), Ok('7'));
//! ```
//!
//! Recursive grammars are built with [`rule::Rule`], a mutable forward
//! reference wired up after its recursive productions have been built; see
//! `tests/sexpr.rs` for a worked grammar built this way.

pub mod combinator;
pub mod error;
pub mod expression;
pub mod parser;
pub mod rule;
pub mod state;
pub mod stream;

pub use error::{PResult, ParseError, Position};
pub use parser::{parse, Parser, ParserExt};

/// Glob-importable surface for grammar authors: the [`Parser`] trait and
/// its `map`/`flat_map` extension, the three state constructors, the error
/// type, and the combinators used in nearly every grammar.
///
/// Grounded in the teacher's `winnow::prelude` — a curated re-export so
/// callers don't have to chase down individual module paths for the
/// vocabulary they use on every line.
pub mod prelude {
    pub use crate::combinator::{
        between, choice, either, label, left, look_ahead, many, many1, mid, not_followed_by,
        option, optional, right, sep_by, sep_by1, try_,
    };
    pub use crate::error::{PResult, ParseError, Position};
    pub use crate::parser::{parse, returning, Parser, ParserExt};
    pub use crate::rule::Rule;
    pub use crate::state::{ByteState, CharState, InputState, Token, TokenState};
}
