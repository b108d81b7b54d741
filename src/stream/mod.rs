//! Stream primitives: `satisfy` specialized to each state flavor, plus the
//! prebuilt character classes and literal grammars spec'd in `spec.md` §4.5.

pub mod byte;
pub mod char;
pub mod token;

use crate::error::ParseError;
use crate::parser::Parser;
use crate::state::InputState;

/// Succeeds with `()` only at end of input; otherwise fails without
/// consuming. Shared across all three state flavors since it only examines
/// `eof_offset`. Grounded in `examples/original_source/prim.go`'s
/// `Eof = Label(Try(NotFollowedBy(Any)), "expect end of input")`, simplified
/// here to a direct `is_eof` check with an equivalent message.
pub fn eof<S>() -> impl Parser<S, ()>
where
    S: InputState,
{
    move |s: &mut S| {
        if s.is_eof() {
            Ok(())
        } else {
            Err(ParseError::new(s.position(), "expect end of input"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CharState;

    #[test]
    fn eof_only_succeeds_at_end() {
        let mut s: CharState = CharState::new("");
        assert!(eof::<CharState>().parse(&mut s).is_ok());
        let mut s2: CharState = CharState::new("x");
        assert!(eof::<CharState>().parse(&mut s2).is_err());
    }
}
