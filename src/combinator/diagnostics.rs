//! Error-message shaping and parser instrumentation: `label`, `expect_eof`,
//! `cache`, `trace`.

use crate::parser::Parser;
use crate::state::InputState;

/// Replace `p`'s error message with `message` on failure, keeping the
/// failure's original position. Grounded in
/// `examples/original_source/charstate/toks.go`'s `Label(NotFollowedBy(...),
/// "end of \`%s\`", name)` idiom — a parser built from primitives that fail
/// with low-level messages, re-surfaced under one grammar-level name.
pub fn label<S, V>(mut p: impl Parser<S, V>, message: impl Into<String> + Clone) -> impl Parser<S, V>
where
    S: InputState,
{
    move |s: &mut S| {
        let start = s.save();
        p.parse(s).map_err(|e| {
            if s.save() == start {
                e.relabel(message.clone())
            } else {
                e
            }
        })
    }
}

/// `left(p, eof())`: `p` must consume everything up to end of input.
/// Mirrors `examples/original_source/prim.go`'s `Eof = Label(Try(NotFollowedBy(Any)),
/// "expect end of input")` composed in front of a caller's top-level parser.
pub fn expect_eof<S, V>(p: impl Parser<S, V>) -> impl Parser<S, V>
where
    S: InputState,
    S::Item: std::fmt::Display,
{
    crate::combinator::core::left(p, crate::stream::eof())
}

/// Packrat-memoize `p` by input position: a second attempt at the same
/// position returns the first attempt's result (and restores the state to
/// wherever that attempt left it) without re-running `p`. Use when a
/// grammar re-tries the same sub-parser from the same position across
/// multiple alternatives sharing a common prefix (see
/// `examples/original_source/example/commonprefix_test.go`'s `Cache`).
///
/// Unlike the original's cache keyed on `(parser identity, position)`, a
/// wrapped closure here owns exactly one memo table keyed on position —
/// the Rust equivalent of "this particular `Cache(p)` call site", since two
/// `cache(p)` calls never share a table.
pub fn cache<S, V>(mut p: impl Parser<S, V>) -> impl Parser<S, V>
where
    S: InputState,
    V: Clone,
{
    let mut memo: std::collections::HashMap<usize, (crate::error::Position, crate::error::PResult<V>)> =
        std::collections::HashMap::new();
    move |s: &mut S| {
        let start = s.position();
        if let Some((rest, result)) = memo.get(&start.index) {
            s.restore(*rest);
            return result.clone();
        }
        let result = p.parse(s);
        memo.insert(start.index, (s.position(), result.clone()));
        result
    }
}

/// Instrumented passthrough: run `p`, then invoke `cb(error, value,
/// remaining_items)` — exactly one of `error`/`value` is `Some`. Neither
/// alters `p`'s semantics nor its commit behavior; `cb` observes, it cannot
/// change the outcome.
pub fn trace<S, V>(
    mut p: impl Parser<S, V>,
    mut cb: impl FnMut(Option<&crate::error::ParseError>, Option<&V>, usize),
) -> impl Parser<S, V>
where
    S: InputState,
{
    move |s: &mut S| {
        let result = p.parse(s);
        match &result {
            Ok(v) => cb(None, Some(v), s.eof_offset()),
            Err(e) => cb(Some(e), None, s.eof_offset()),
        }
        result
    }
}

/// A depth-indented call/return logger built on [`trace`], enabled by the
/// `debug` feature: announces entry before running `p` and exit afterward,
/// colored by outcome. Grounded in the teacher's `src/trace/mod.rs`, adapted
/// to this crate's two-outcome (success/failure) result shape rather than
/// winnow's four-way `ErrMode` severities.
#[cfg_attr(not(feature = "debug"), allow(unused_variables))]
pub fn trace_named<S, V>(name: impl std::fmt::Display + 'static, mut p: impl Parser<S, V>) -> impl Parser<S, V>
where
    S: InputState,
{
    #[cfg(feature = "debug")]
    {
        move |s: &mut S| {
            let depth = internals::Depth::enter();
            let start = s.position();
            internals::announce_start(*depth, &name, start);
            let result = p.parse(s);
            internals::announce_end(*depth, &name, start, s.position(), result.is_ok());
            result
        }
    }
    #[cfg(not(feature = "debug"))]
    {
        move |s: &mut S| p.parse(s)
    }
}

#[cfg(feature = "debug")]
mod internals {
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DEPTH: AtomicUsize = AtomicUsize::new(0);

    pub struct Depth(usize);

    impl Depth {
        pub fn enter() -> Self {
            Depth(DEPTH.fetch_add(1, Ordering::SeqCst))
        }
    }

    impl Drop for Depth {
        fn drop(&mut self) {
            DEPTH.fetch_sub(1, Ordering::SeqCst);
        }
    }

    impl std::ops::Deref for Depth {
        type Target = usize;
        fn deref(&self) -> &usize {
            &self.0
        }
    }

    fn gutter(depth: usize) -> String {
        "  ".repeat(depth)
    }

    pub fn announce_start(depth: usize, name: &dyn std::fmt::Display, at: crate::error::Position) {
        let style = anstyle::Style::new().bold();
        eprintln!("{}{style}> {name}{style:#} @ {at}", gutter(depth));
    }

    pub fn announce_end(
        depth: usize,
        name: &dyn std::fmt::Display,
        start: crate::error::Position,
        end: crate::error::Position,
        ok: bool,
    ) {
        let color = if ok {
            anstyle::AnsiColor::Green
        } else {
            anstyle::AnsiColor::Red
        };
        let style = anstyle::Style::new().fg_color(Some(color.into()));
        let verb = if ok { "matched" } else { "failed" };
        eprintln!(
            "{}{style}< {name} {verb}{style:#} ({} -> {})",
            gutter(depth),
            start,
            end
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CharState;
    use crate::stream::char::char;

    #[test]
    fn label_replaces_message_but_not_position() {
        let mut s: CharState = CharState::new("b");
        let err = label(char('a'), "digit or letter").parse(&mut s).unwrap_err();
        assert_eq!(err.message, "digit or letter");
        assert_eq!(err.position.index, 0);
    }

    #[test]
    fn expect_eof_only_succeeds_when_p_exhausts_input() {
        let mut s: CharState = CharState::new("a");
        assert!(expect_eof(char('a')).parse(&mut s).is_ok());
        let mut s2: CharState = CharState::new("ab");
        assert!(expect_eof(char('a')).parse(&mut s2).is_err());
    }

    #[test]
    fn trace_reports_outcome_without_altering_it() {
        let mut s: CharState = CharState::new("a");
        let mut seen = None;
        {
            let mut p = trace(char('a'), |err, val, _rem| {
                seen = Some((err.is_none(), val.copied()));
            });
            assert_eq!(p.parse(&mut s), Ok('a'));
        }
        assert_eq!(seen, Some((true, Some('a'))));
    }

    #[test]
    fn cache_avoids_rerunning_on_repeat_position() {
        use std::cell::Cell;
        use std::rc::Rc;
        let calls = Rc::new(Cell::new(0));
        let calls2 = calls.clone();
        let mut cached = cache(move |s: &mut CharState| {
            calls2.set(calls2.get() + 1);
            char('a').parse(s)
        });
        let mut s: CharState = CharState::new("a");
        assert_eq!(cached.parse(&mut s), Ok('a'));
        s.restore(crate::error::Position::START);
        assert_eq!(cached.parse(&mut s), Ok('a'));
        assert_eq!(calls.get(), 1);
    }
}
