//! Repetition and separation: `count`, `many`/`many1`, `skip_many`/
//! `skip_many1`, `sep_by*`, `end_by*`, `sep_end_by*`, `many_till`, and the
//! `chainl`/`chainr` family.
//!
//! Every combinator here is a direct loop over `save`/`restore`/`parse`
//! rather than a recursive `flat_map` chain, so recursion depth tracks
//! grammar nesting, not input length — grounded in
//! `examples/original_source/legacy/combinator.go`'s iterative rewrites of
//! `Many`/`Many1`/`SepBy`/`SepBy1`/`ManyTill`/`Choice`/`Count` (see
//! `DESIGN.md`). As with the original, the argument parser must consume at
//! least one item per successful iteration or the loop diverges — that is a
//! grammar-author obligation, not something this crate can enforce.

use crate::parser::Parser;
use crate::state::InputState;

/// Apply `p` exactly `n` times, collecting values. `n == 0` yields an empty
/// collection without touching `state`.
pub fn count<S, V, C>(mut p: impl Parser<S, V>, n: usize) -> impl Parser<S, C>
where
    S: InputState,
    C: Default + Extend<V>,
{
    move |s: &mut S| {
        let mut acc = C::default();
        for _ in 0..n {
            acc.extend(std::iter::once(p.parse(s)?));
        }
        Ok(acc)
    }
}

/// Zero or more repetitions of `p`, collected in order.
pub fn many<S, V, C>(mut p: impl Parser<S, V>) -> impl Parser<S, C>
where
    S: InputState,
    C: Default + Extend<V>,
{
    move |s: &mut S| {
        let mut acc = C::default();
        loop {
            let saved = s.save();
            match p.parse(s) {
                Ok(v) => acc.extend(std::iter::once(v)),
                Err(_) => {
                    s.restore(saved);
                    return Ok(acc);
                }
            }
        }
    }
}

/// One or more repetitions of `p`, collected in order.
pub fn many1<S, V, C>(mut p: impl Parser<S, V>) -> impl Parser<S, C>
where
    S: InputState,
    C: Default + Extend<V>,
{
    move |s: &mut S| {
        let mut acc = C::default();
        acc.extend(std::iter::once(p.parse(s)?));
        loop {
            let saved = s.save();
            match p.parse(s) {
                Ok(v) => acc.extend(std::iter::once(v)),
                Err(_) => {
                    s.restore(saved);
                    return Ok(acc);
                }
            }
        }
    }
}

/// Zero or more repetitions of `p`, discarding the values.
pub fn skip_many<S, V>(mut p: impl Parser<S, V>) -> impl Parser<S, ()>
where
    S: InputState,
{
    move |s: &mut S| loop {
        let saved = s.save();
        if p.parse(s).is_err() {
            s.restore(saved);
            return Ok(());
        }
    }
}

/// One or more repetitions of `p`, discarding the values.
pub fn skip_many1<S, V>(mut p: impl Parser<S, V>) -> impl Parser<S, ()>
where
    S: InputState,
{
    move |s: &mut S| {
        p.parse(s)?;
        loop {
            let saved = s.save();
            if p.parse(s).is_err() {
                s.restore(saved);
                return Ok(());
            }
        }
    }
}

/// `p (sep p)*`; no trailing separator is consumed — a dangling `sep` not
/// followed by `p` rolls back and is left in the input.
pub fn sep_by<S, V, Sep, C>(mut p: impl Parser<S, V>, mut sep: impl Parser<S, Sep>) -> impl Parser<S, C>
where
    S: InputState,
    C: Default + Extend<V>,
{
    move |s: &mut S| {
        let mut acc = C::default();
        let first = {
            let saved = s.save();
            match p.parse(s) {
                Ok(v) => v,
                Err(_) => {
                    s.restore(saved);
                    return Ok(acc);
                }
            }
        };
        acc.extend(std::iter::once(first));
        loop {
            let saved = s.save();
            if sep.parse(s).is_err() {
                s.restore(saved);
                return Ok(acc);
            }
            match p.parse(s) {
                Ok(v) => acc.extend(std::iter::once(v)),
                Err(_) => {
                    s.restore(saved);
                    return Ok(acc);
                }
            }
        }
    }
}

/// `p (sep p)*`, requiring at least one `p`.
pub fn sep_by1<S, V, Sep, C>(mut p: impl Parser<S, V>, mut sep: impl Parser<S, Sep>) -> impl Parser<S, C>
where
    S: InputState,
    C: Default + Extend<V>,
{
    move |s: &mut S| {
        let mut acc = C::default();
        acc.extend(std::iter::once(p.parse(s)?));
        loop {
            let saved = s.save();
            if sep.parse(s).is_err() {
                s.restore(saved);
                return Ok(acc);
            }
            match p.parse(s) {
                Ok(v) => acc.extend(std::iter::once(v)),
                Err(_) => {
                    s.restore(saved);
                    return Ok(acc);
                }
            }
        }
    }
}

/// `(p sep)*`; a trailing separator is required after every `p`.
pub fn end_by<S, V, Sep, C>(mut p: impl Parser<S, V>, mut sep: impl Parser<S, Sep>) -> impl Parser<S, C>
where
    S: InputState,
    C: Default + Extend<V>,
{
    move |s: &mut S| {
        let mut acc = C::default();
        loop {
            let saved = s.save();
            let v = match p.parse(s) {
                Ok(v) => v,
                Err(_) => {
                    s.restore(saved);
                    return Ok(acc);
                }
            };
            if sep.parse(s).is_err() {
                s.restore(saved);
                return Ok(acc);
            }
            acc.extend(std::iter::once(v));
        }
    }
}

/// `(p sep)+`; at least one `p sep` pair is required.
pub fn end_by1<S, V, Sep, C>(mut p: impl Parser<S, V>, mut sep: impl Parser<S, Sep>) -> impl Parser<S, C>
where
    S: InputState,
    C: Default + Extend<V>,
{
    move |s: &mut S| {
        let mut acc = C::default();
        let saved = s.save();
        let v = p.parse(s)?;
        sep.parse(s).map_err(|e| {
            s.restore(saved);
            e
        })?;
        acc.extend(std::iter::once(v));
        loop {
            let saved = s.save();
            let v = match p.parse(s) {
                Ok(v) => v,
                Err(_) => {
                    s.restore(saved);
                    return Ok(acc);
                }
            };
            if sep.parse(s).is_err() {
                s.restore(saved);
                return Ok(acc);
            }
            acc.extend(std::iter::once(v));
        }
    }
}

/// `p (sep p)*`, with an optional trailing separator.
pub fn sep_end_by<S, V, Sep, C>(mut p: impl Parser<S, V>, mut sep: impl Parser<S, Sep>) -> impl Parser<S, C>
where
    S: InputState,
    C: Default + Extend<V>,
{
    move |s: &mut S| {
        let mut acc = C::default();
        let saved = s.save();
        let first = match p.parse(s) {
            Ok(v) => v,
            Err(_) => {
                s.restore(saved);
                return Ok(acc);
            }
        };
        acc.extend(std::iter::once(first));
        loop {
            let saved = s.save();
            if sep.parse(s).is_err() {
                s.restore(saved);
                return Ok(acc);
            }
            let saved_after_sep = s.save();
            match p.parse(s) {
                Ok(v) => acc.extend(std::iter::once(v)),
                Err(_) => {
                    s.restore(saved_after_sep);
                    return Ok(acc);
                }
            }
        }
    }
}

/// `p (sep p)+`, with an optional trailing separator; at least one `p`.
pub fn sep_end_by1<S, V, Sep, C>(mut p: impl Parser<S, V>, mut sep: impl Parser<S, Sep>) -> impl Parser<S, C>
where
    S: InputState,
    C: Default + Extend<V>,
{
    move |s: &mut S| {
        let mut acc = C::default();
        acc.extend(std::iter::once(p.parse(s)?));
        loop {
            let saved = s.save();
            if sep.parse(s).is_err() {
                s.restore(saved);
                return Ok(acc);
            }
            let saved_after_sep = s.save();
            match p.parse(s) {
                Ok(v) => acc.extend(std::iter::once(v)),
                Err(_) => {
                    s.restore(saved_after_sep);
                    return Ok(acc);
                }
            }
        }
    }
}

/// Repeatedly try `end` first; once it succeeds, return the values
/// collected from `p` so far (`end`'s own value is discarded, matching
/// `legacy/combinator.go::ManyTill`'s `return xs, nil`). Fails if `p` fails
/// while `end` has not yet matched.
pub fn many_till<S, V, E, C>(mut p: impl Parser<S, V>, mut end: impl Parser<S, E>) -> impl Parser<S, C>
where
    S: InputState,
    C: Default + Extend<V>,
{
    move |s: &mut S| {
        let mut acc = C::default();
        loop {
            let saved = s.save();
            match end.parse(s) {
                Ok(_) => return Ok(acc),
                Err(_) => s.restore(saved),
            }
            acc.extend(std::iter::once(p.parse(s)?));
        }
    }
}

/// Left-associative chain: parse `p`, then greedily `(op p)*`, folding left
/// with `op`'s binary function. Zero occurrences of `op p` yields `default`.
pub fn chainl<S, V>(
    p: impl Parser<S, V> + Clone,
    op: impl Parser<S, Box<dyn Fn(V, V) -> V>>,
    default: V,
) -> impl Parser<S, V>
where
    S: InputState,
    V: Clone,
{
    let mut p1 = chainl1(p, op);
    move |s: &mut S| {
        let saved = s.save();
        match p1.parse(s) {
            Ok(v) => Ok(v),
            Err(_) => {
                s.restore(saved);
                Ok(default.clone())
            }
        }
    }
}

/// Left-associative chain requiring at least one `p`.
pub fn chainl1<S, V>(
    mut p: impl Parser<S, V> + Clone,
    mut op: impl Parser<S, Box<dyn Fn(V, V) -> V>>,
) -> impl Parser<S, V>
where
    S: InputState,
{
    move |s: &mut S| {
        let mut acc = p.parse(s)?;
        loop {
            let saved = s.save();
            let f = match op.parse(s) {
                Ok(f) => f,
                Err(_) => {
                    s.restore(saved);
                    return Ok(acc);
                }
            };
            match p.parse(s) {
                Ok(rhs) => acc = f(acc, rhs),
                Err(e) => return Err(e),
            }
        }
    }
}

/// Right-associative chain: parse `p`, optionally `op`, then recurse. Zero
/// occurrences yields `default`.
pub fn chainr<S, V>(
    p: impl Parser<S, V> + Clone + 'static,
    op: impl Parser<S, Box<dyn Fn(V, V) -> V>> + Clone + 'static,
    default: V,
) -> impl Parser<S, V>
where
    S: InputState + 'static,
    V: Clone + 'static,
{
    let mut p1 = chainr1(p, op);
    move |s: &mut S| {
        let saved = s.save();
        match p1.parse(s) {
            Ok(v) => Ok(v),
            Err(_) => {
                s.restore(saved);
                Ok(default.clone())
            }
        }
    }
}

/// Right-associative chain requiring at least one `p`.
pub fn chainr1<S, V>(
    p: impl Parser<S, V> + Clone + 'static,
    op: impl Parser<S, Box<dyn Fn(V, V) -> V>> + Clone + 'static,
) -> impl Parser<S, V>
where
    S: InputState + 'static,
    V: 'static,
{
    fn go<S, V>(
        mut p: impl Parser<S, V> + Clone + 'static,
        mut op: impl Parser<S, Box<dyn Fn(V, V) -> V>> + Clone + 'static,
    ) -> Box<dyn FnMut(&mut S) -> crate::error::PResult<V>>
    where
        S: InputState + 'static,
        V: 'static,
    {
        Box::new(move |s: &mut S| {
            let lhs = p.parse(s)?;
            let saved = s.save();
            let f = match op.parse(s) {
                Ok(f) => f,
                Err(_) => {
                    s.restore(saved);
                    return Ok(lhs);
                }
            };
            let mut rest = go(p.clone(), op.clone());
            let rhs = rest(s)?;
            Ok(f(lhs, rhs))
        })
    }
    let mut inner = go(p, op);
    move |s: &mut S| inner(s)
}
