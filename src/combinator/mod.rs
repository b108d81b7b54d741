//! Parser combinators, grouped by concern: sequencing ([`core`]),
//! alternation ([`alt`]), repetition ([`repeat`]), and diagnostics
//! ([`diagnostics`]).
//!
//! Every combinator here is a free function taking parsers by value and
//! returning `impl Parser<S, V>` — there is no combinator trait beyond
//! [`crate::parser::ParserExt`]'s `map`/`flat_map`, matching
//! `examples/original_source/combinator.go`'s flat function-per-combinator
//! shape rather than a fluent builder.

pub mod alt;
pub mod core;
pub mod diagnostics;
pub mod repeat;

pub use alt::{choice, either, look_ahead, not_followed_by, option, optional, try_};
pub use core::{between, flat_map, left, map, mid, right, seq, trim};
pub use diagnostics::{cache, expect_eof, label, trace, trace_named};
pub use repeat::{
    chainl, chainl1, chainr, chainr1, count, end_by, end_by1, many, many1, many_till, sep_by,
    sep_by1, sep_end_by, sep_end_by1, skip_many, skip_many1,
};
