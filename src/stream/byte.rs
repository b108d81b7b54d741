//! Primitive parsers over [`ByteState`]: single bytes, literal byte
//! strings, and regex-anchored productions over raw octets.
//!
//! Grounded in `examples/original_source/states/bytestate` (the byte-flavored
//! twin of `charstate/prim.go`).

use crate::error::ParseError;
use crate::parser::{satisfy, Parser};
use crate::state::{ByteState, InputState};

/// `satisfy(|b| b == expected, shown(expected))`.
pub fn byte<U: Clone>(expected: u8) -> impl Parser<ByteState<U>, u8> {
    satisfy(move |b: &u8| *b == expected, DisplayByte(expected))
}

/// Any single byte; fails only at end of input.
pub fn any_byte<U: Clone>() -> impl Parser<ByteState<U>, u8> {
    satisfy(|_: &u8| true, "any byte")
}

/// A byte drawn from the literal alphabet `bytes`.
pub fn one_of<U: Clone>(bytes: impl Into<Vec<u8>>) -> impl Parser<ByteState<U>, u8> {
    let alphabet = bytes.into();
    satisfy(
        move |b: &u8| alphabet.contains(b),
        format!("one of {:?}", String::from_utf8_lossy(&alphabet)),
    )
}

/// A byte excluded from the literal alphabet `bytes`.
pub fn none_of<U: Clone>(bytes: impl Into<Vec<u8>>) -> impl Parser<ByteState<U>, u8> {
    let alphabet = bytes.into();
    satisfy(
        move |b: &u8| !alphabet.contains(b),
        format!("none of {:?}", String::from_utf8_lossy(&alphabet)),
    )
}

/// Match the exact byte sequence `literal`.
pub fn str<U: Clone>(literal: impl Into<Vec<u8>>) -> impl Parser<ByteState<U>, Vec<u8>> {
    let literal = literal.into();
    move |s: &mut ByteState<U>| {
        for expected in literal.iter().copied() {
            let pos = s.save();
            match s.advance_if(|b| *b == expected) {
                Some(_) => {}
                None => {
                    return Err(match s.peek() {
                        Some(actual) => ParseError::expected(pos, DisplayByte(expected), DisplayByte(actual)),
                        None => ParseError::expected_eoi(pos, DisplayByte(expected)),
                    })
                }
            }
        }
        Ok(literal.clone())
    }
}

/// Anchor `pattern` at the current position and advance past the longest
/// match over the raw bytes.
#[cfg(feature = "regex")]
pub fn regex<U: Clone>(pattern: impl AsRef<str>) -> impl Parser<ByteState<U>, Vec<u8>> {
    let anchored = regex::bytes::Regex::new(&format!("^(?:{})", pattern.as_ref()))
        .expect("invalid regex pattern passed to stream::byte::regex");
    move |s: &mut ByteState<U>| {
        let pos = s.save();
        let remaining = s.remaining().to_vec();
        match anchored.find(&remaining) {
            Some(m) => {
                let found = m.as_bytes().to_vec();
                for _ in 0..found.len() {
                    s.advance();
                }
                Ok(found)
            }
            None => Err(ParseError::new(
                pos,
                format!("expect pattern '{}'", pattern.as_ref()),
            )),
        }
    }
}

/// Wraps a `u8` for display as `` `c` `` (printable ASCII) or `0xNN`.
struct DisplayByte(u8);

impl std::fmt::Display for DisplayByte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_ascii_graphic() || self.0 == b' ' {
            write!(f, "{}", self.0 as char)
        } else {
            write!(f, "0x{:02x}", self.0)
        }
    }
}
