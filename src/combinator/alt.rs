//! Backtracking and alternation: `try_`, `look_ahead`, `either`, `choice`,
//! `option`, `optional`, `not_followed_by`.
//!
//! Grounded in `examples/original_source/combinator.go`'s `Try`/`LookAhead`/
//! `Either`/`Choice`/`Option`/`Optional` (see `DESIGN.md`). `choice` folds
//! right exactly as the original's `Choice(xs...) = Either(xs[0],
//! Choice(xs[1:]...))`, wrapping every alternative but the last in `try_` so
//! a failed earlier alternative never leaves the cursor advanced.

use crate::error::ParseError;
use crate::parser::Parser;
use crate::state::InputState;

/// Run `p`; on failure, restore the state to where it started. On success,
/// behaves exactly like `p` (including any advancement).
pub fn try_<S, V>(mut p: impl Parser<S, V>) -> impl Parser<S, V>
where
    S: InputState,
{
    move |s: &mut S| {
        let saved = s.save();
        match p.parse(s) {
            Ok(v) => Ok(v),
            Err(e) => {
                s.restore(saved);
                Err(e)
            }
        }
    }
}

/// Run `p`; on success, restore the state and yield `p`'s value — a pure
/// lookahead that never consumes. On failure the state is *not* restored
/// (wrap in `try_` if a failing peek should also roll back).
pub fn look_ahead<S, V>(mut p: impl Parser<S, V>) -> impl Parser<S, V>
where
    S: InputState,
{
    move |s: &mut S| {
        let saved = s.save();
        let v = p.parse(s)?;
        s.restore(saved);
        Ok(v)
    }
}

/// `try_(a)` then, only if that failed, `b`. `a` never leaves a partial
/// advance behind; `b` runs from the original position.
pub fn either<S, V>(mut a: impl Parser<S, V>, mut b: impl Parser<S, V>) -> impl Parser<S, V>
where
    S: InputState,
{
    move |s: &mut S| {
        let saved = s.save();
        match a.parse(s) {
            Ok(v) => Ok(v),
            Err(_) => {
                s.restore(saved);
                b.parse(s)
            }
        }
    }
}

/// Try each alternative in order, returning the first success. Every
/// alternative but the last is implicitly wrapped in [`try_`], so a failure
/// partway through one alternative never blocks the next from being tried
/// at the original position. The last alternative is not wrapped, so its
/// errors (and any partial advance) surface as `choice`'s own outcome.
pub fn choice<S, V>(mut ps: Vec<Box<dyn Parser<S, V>>>) -> impl Parser<S, V>
where
    S: InputState,
{
    move |s: &mut S| {
        if ps.is_empty() {
            return Err(ParseError::new(s.position(), "no choice"));
        }
        let last = ps.len() - 1;
        for p in ps[..last].iter_mut() {
            let saved = s.save();
            match p.parse(s) {
                Ok(v) => return Ok(v),
                Err(_) => s.restore(saved),
            }
        }
        ps[last].parse(s)
    }
}

/// `p`, or `default` if `p` fails. A failing `p` never consumes — `option`
/// wraps it in [`try_`] internally.
pub fn option<S, V: Clone>(p: impl Parser<S, V>, default: V) -> impl Parser<S, V>
where
    S: InputState,
{
    either(try_(p), crate::parser::returning(default))
}

/// `p`, discarding its value; succeeds with `()` whether or not `p`
/// matched. A failing `p` never consumes.
pub fn optional<S, V>(mut p: impl Parser<S, V>) -> impl Parser<S, ()>
where
    S: InputState,
{
    move |s: &mut S| {
        let saved = s.save();
        if p.parse(s).is_err() {
            s.restore(saved);
        }
        Ok(())
    }
}

/// Succeeds with `()`, consuming nothing, iff `p` fails at the current
/// position. If `p` succeeds, `not_followed_by` fails (restoring the
/// state first, since the failure itself should not appear to have
/// consumed `p`'s match).
pub fn not_followed_by<S, V>(mut p: impl Parser<S, V>) -> impl Parser<S, ()>
where
    S: InputState,
    V: std::fmt::Display,
{
    move |s: &mut S| {
        let saved = s.save();
        match p.parse(s) {
            Ok(v) => {
                s.restore(saved);
                Err(ParseError::unexpected(saved, v))
            }
            Err(_) => {
                s.restore(saved);
                Ok(())
            }
        }
    }
}
