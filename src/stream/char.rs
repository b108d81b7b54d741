//! Primitive parsers over [`CharState`]: single characters, literal
//! strings, regex-anchored productions, and the prebuilt character classes
//! and literal grammars.
//!
//! Grounded in `examples/original_source/states/charstate/prim.go`.

use crate::error::ParseError;
use crate::parser::{satisfy, Parser};
use crate::state::{CharState, InputState};

/// `satisfy(|c| c == expected, shown(expected))`.
pub fn char<U: Clone>(expected: char) -> impl Parser<CharState<U>, char> {
    satisfy(move |c: &char| *c == expected, expected.to_string())
}

/// Any single character; fails only at end of input.
pub fn any_char<U: Clone>() -> impl Parser<CharState<U>, char> {
    satisfy(|_: &char| true, "any char")
}

/// A character drawn from the literal alphabet `chars`.
pub fn one_of<U: Clone>(chars: impl Into<String>) -> impl Parser<CharState<U>, char> {
    let alphabet = chars.into();
    satisfy(
        move |c: &char| alphabet.contains(*c),
        format!("one of '{alphabet}'"),
    )
}

/// A character excluded from the literal alphabet `chars`.
pub fn none_of<U: Clone>(chars: impl Into<String>) -> impl Parser<CharState<U>, char> {
    let alphabet = chars.into();
    satisfy(
        move |c: &char| !alphabet.contains(*c),
        format!("none of '{alphabet}'"),
    )
}

/// Match the exact sequence `literal`. On mismatch, the state is left as it
/// was after the longest matching prefix — rewind fully with `try_(str(..))`
/// if a clean rollback on any mismatch is required.
pub fn str<U: Clone>(literal: impl Into<String>) -> impl Parser<CharState<U>, String> {
    let literal = literal.into();
    move |s: &mut CharState<U>| {
        for expected in literal.chars() {
            let pos = s.save();
            match s.advance_if(|c| *c == expected) {
                Some(_) => {}
                None => {
                    return Err(match s.peek() {
                        Some(actual) => ParseError::expected(pos, expected, actual),
                        None => ParseError::expected_eoi(pos, expected),
                    })
                }
            }
        }
        Ok(literal.clone())
    }
}

/// Anchor `pattern` at the current position (`^(?:pattern)`) and advance
/// past the longest match; fails without consuming if the pattern does not
/// match right here.
#[cfg(feature = "regex")]
pub fn regex<U: Clone>(pattern: impl AsRef<str>) -> impl Parser<CharState<U>, String> {
    let anchored = regex::Regex::new(&format!("^(?:{})", pattern.as_ref()))
        .expect("invalid regex pattern passed to stream::char::regex");
    move |s: &mut CharState<U>| {
        let pos = s.save();
        let remaining = s.remaining();
        match anchored.find(&remaining) {
            Some(m) => {
                let found = m.as_str().to_string();
                for _ in found.chars() {
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

/// An uppercase letter.
pub fn upper<U: Clone>() -> impl Parser<CharState<U>, char> {
    satisfy(|c: &char| c.is_uppercase(), "upper")
}

/// A lowercase letter.
pub fn lower<U: Clone>() -> impl Parser<CharState<U>, char> {
    satisfy(|c: &char| c.is_lowercase(), "lower")
}

/// Any alphabetic character.
pub fn letter<U: Clone>() -> impl Parser<CharState<U>, char> {
    satisfy(|c: &char| c.is_alphabetic(), "letter")
}

/// An ASCII digit.
pub fn digit<U: Clone>() -> impl Parser<CharState<U>, char> {
    satisfy(|c: &char| c.is_ascii_digit(), "digit")
}

/// Any Unicode numeric character (a broader class than [`digit`]).
pub fn number<U: Clone>() -> impl Parser<CharState<U>, char> {
    satisfy(|c: &char| c.is_numeric(), "number")
}

/// Any whitespace character.
pub fn space<U: Clone>() -> impl Parser<CharState<U>, char> {
    satisfy(|c: &char| c.is_whitespace(), "space")
}

/// Zero or more whitespace characters, discarded.
pub fn spaces<U: Clone>() -> impl Parser<CharState<U>, ()> {
    crate::combinator::skip_many(space())
}

/// The `'\n'` character.
pub fn newline<U: Clone>() -> impl Parser<CharState<U>, char> {
    char('\n')
}

/// The two-character sequence `"\r\n"`.
pub fn crlf<U: Clone>() -> impl Parser<CharState<U>, String> {
    str("\r\n")
}

/// `newline()` or `crlf()`, yielding the matched text either way.
pub fn end_of_line<U: Clone + 'static>() -> impl Parser<CharState<U>, String> {
    crate::combinator::either(
        crate::combinator::map(newline(), |c| c.to_string()),
        crlf(),
    )
}

/// The `'\t'` character.
pub fn tab<U: Clone>() -> impl Parser<CharState<U>, char> {
    char('\t')
}

/// Integer literal: optional sign, and a `0b`/`0o`/`0x`/decimal mantissa.
#[cfg(feature = "regex")]
pub fn lit_int<U: Clone>() -> impl Parser<CharState<U>, String> {
    regex(concat!(
        r"(?:[+-]?0b(?:0|1[01]*))",
        r"|(?:[+-]?0x(?:0|[1-9a-fA-F][0-9a-fA-F]*))",
        r"|(?:[+-]?0o(?:0|[1-7][0-7]*))",
        r"|(?:[+-]?(?:0|[1-9][0-9]*))",
    ))
}

/// Float literal: optional sign, mandatory fractional part or exponent.
#[cfg(feature = "regex")]
pub fn lit_float<U: Clone>() -> impl Parser<CharState<U>, String> {
    regex(concat!(
        r"(?:[+-]?(?:0|[1-9][0-9]*)(?:[.][0-9]+)+(?:[eE][-+]?[0-9]+)?)",
        r"|(?:[+-]?(?:0|[1-9][0-9]*)(?:[.][0-9]+)?(?:[eE][-+]?[0-9]+)+)",
    ))
}

/// A double-quoted string literal with standard escapes and `\uXXXX`, or a
/// back-tick-delimited raw string.
#[cfg(feature = "regex")]
pub fn lit_str<U: Clone>() -> impl Parser<CharState<U>, String> {
    regex(
        r#"(?:"(?:[^"\\]*|\\["\\trnbf/]|\\u[0-9a-fA-F]{4})*")|(?:`[^`]*`)"#,
    )
}

/// `[letter | _] [letter | digit | _]*`, with Unicode letter support.
#[cfg(feature = "regex")]
pub fn ident<U: Clone>() -> impl Parser<CharState<U>, String> {
    regex(r"[\p{L}_][\p{L}0-9_]*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CharState;

    #[test]
    fn char_matches_or_fails_without_consuming() {
        let mut s: CharState = CharState::new("ab");
        assert_eq!(char('a').parse(&mut s), Ok('a'));
        let err = char('z').parse(&mut s).unwrap_err();
        assert_eq!(err.message, "expect `z` actual `b`");
        assert_eq!(s.position().index, 1);
    }

    #[test]
    fn str_matches_whole_literal() {
        let mut s: CharState = CharState::new("lethal");
        assert_eq!(str("let").parse(&mut s), Ok("let".to_string()));
        assert_eq!(s.position().index, 3);
    }

    #[test]
    fn one_of_and_none_of() {
        let mut s: CharState = CharState::new("xyz");
        assert_eq!(one_of("xy").parse(&mut s), Ok('x'));
        assert!(none_of("y").parse(&mut s).is_ok());
    }

    #[cfg(feature = "regex")]
    #[test]
    fn regex_anchors_at_current_position() {
        let mut s: CharState = CharState::new("123abc");
        assert_eq!(regex(r"\d+").parse(&mut s), Ok("123".to_string()));
        assert_eq!(s.position().index, 3);
        assert!(regex::<()>(r"\d+").parse(&mut s).is_err());
    }

    #[cfg(feature = "regex")]
    #[test]
    fn ident_accepts_unicode_letters() {
        let mut s: CharState = CharState::new("café_1 x");
        assert_eq!(ident().parse(&mut s), Ok("café_1".to_string()));
    }
}
