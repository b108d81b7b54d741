//! Sequencing and value-shaping combinators: `map`, `flat_map`, `seq`,
//! `list`, `left`/`right`, `between`/`mid`, `trim`.

use crate::parser::Parser;
use crate::state::InputState;

/// On success, apply `f` to the value; on failure, propagate unchanged.
pub fn map<S, V, W>(mut p: impl Parser<S, V>, mut f: impl FnMut(V) -> W) -> impl Parser<S, W>
where
    S: InputState,
{
    move |s: &mut S| p.parse(s).map(&mut f)
}

/// Run `p`; on success, run `k(value)` and return its result.
pub fn flat_map<S, V, W>(
    mut p: impl Parser<S, V>,
    mut k: impl FnMut(V) -> Box<dyn Parser<S, W>>,
) -> impl Parser<S, W>
where
    S: InputState,
{
    move |s: &mut S| {
        let v = p.parse(s)?;
        k(v).parse(s)
    }
}

/// Run `a` then `b`, yielding `f(a_value, b_value)`.
///
/// If `b` fails after `a` succeeded, the parser has committed (the cursor
/// has advanced past `a`'s consumption, and `seq` does not restore it).
pub fn seq<S, A, B, W>(
    mut a: impl Parser<S, A>,
    mut b: impl Parser<S, B>,
    mut f: impl FnMut(A, B) -> W,
) -> impl Parser<S, W>
where
    S: InputState,
{
    move |s: &mut S| {
        let av = a.parse(s)?;
        let bv = b.parse(s)?;
        Ok(f(av, bv))
    }
}

/// Sequence `a` then `b`, keeping `a`'s value.
pub fn left<S, A, B>(mut a: impl Parser<S, A>, mut b: impl Parser<S, B>) -> impl Parser<S, A>
where
    S: InputState,
{
    move |s: &mut S| {
        let av = a.parse(s)?;
        b.parse(s)?;
        Ok(av)
    }
}

/// Sequence `a` then `b`, keeping `b`'s value.
pub fn right<S, A, B>(mut a: impl Parser<S, A>, mut b: impl Parser<S, B>) -> impl Parser<S, B>
where
    S: InputState,
{
    move |s: &mut S| {
        a.parse(s)?;
        b.parse(s)
    }
}

/// `open . p . close`, yielding `p`'s value.
pub fn between<S, O, V, C>(
    open: impl Parser<S, O>,
    close: impl Parser<S, C>,
    p: impl Parser<S, V>,
) -> impl Parser<S, V>
where
    S: InputState,
{
    right(open, left(p, close))
}

/// Alias for [`between`] with the argument order `(open, p, close)`, which
/// reads better at call sites: `mid(lparen, expr, rparen)`.
pub fn mid<S, O, V, C>(
    open: impl Parser<S, O>,
    p: impl Parser<S, V>,
    close: impl Parser<S, C>,
) -> impl Parser<S, V>
where
    S: InputState,
{
    between(open, close, p)
}

/// `many(ws) . p . many(ws)`, discarding the surrounding whitespace matches.
pub fn trim<S, V, W>(p: impl Parser<S, V>, ws: impl Parser<S, W> + Clone) -> impl Parser<S, V>
where
    S: InputState,
{
    between(
        crate::combinator::repeat::many::<_, _, Vec<_>>(ws.clone()),
        crate::combinator::repeat::many::<_, _, Vec<_>>(ws),
        p,
    )
}

/// Sequence two to five parsers positionally, yielding their values as an
/// n-tuple (an ordered heterogeneous sequence, per `spec.md` §4.3's
/// `list(p1,…,pn)`). Built from nested [`seq`] calls — name more than five
/// and flatten the result with [`map`] instead.
#[macro_export]
macro_rules! list {
    ($p1:expr, $p2:expr $(,)?) => {
        $crate::combinator::core::seq($p1, $p2, |a, b| (a, b))
    };
    ($p1:expr, $p2:expr, $p3:expr $(,)?) => {
        $crate::combinator::core::seq($crate::list!($p1, $p2), $p3, |(a, b), c| (a, b, c))
    };
    ($p1:expr, $p2:expr, $p3:expr, $p4:expr $(,)?) => {
        $crate::combinator::core::seq($crate::list!($p1, $p2, $p3), $p4, |(a, b, c), d| {
            (a, b, c, d)
        })
    };
    ($p1:expr, $p2:expr, $p3:expr, $p4:expr, $p5:expr $(,)?) => {
        $crate::combinator::core::seq($crate::list!($p1, $p2, $p3, $p4), $p5, |(a, b, c, d), e| {
            (a, b, c, d, e)
        })
    };
}
