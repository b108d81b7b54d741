//! The operator-table expression-parser builder.
//!
//! Grounded in `examples/original_source/exprparser/{oper.go,factory.go,
//! build_expr_parser.go}` (the newer `Infix`-terminology revision) and the
//! worked grammar in `examples/original_source/example/buildexpr_test.go`.
//! A table is a list of groups in descending precedence; each group is
//! folded around the parser built from the groups before it, so the last
//! group built binds tightest.

use std::rc::Rc;

use crate::combinator::{choice, either, label};
use crate::error::{ParseError, PResult};
use crate::parser::{returning, Parser};
use crate::state::InputState;

/// A unary semantic action, shared by prefix and postfix operators.
pub type UnaryFn<V> = Rc<dyn Fn(V) -> V>;
/// A binary semantic action, shared by all three infix associativities.
pub type BinaryFn<V> = Rc<dyn Fn(V, V) -> V>;

/// Infix associativity. The `Display` strings (`none`/`left`/`right`) feed
/// directly into the `"ambiguous use of a <assoc> associative operator"`
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    None,
    Left,
    Right,
}

impl std::fmt::Display for Assoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Assoc::None => "none",
            Assoc::Left => "left",
            Assoc::Right => "right",
        })
    }
}

enum Kind<S, V> {
    Prefix(Box<dyn Parser<S, UnaryFn<V>>>),
    Postfix(Box<dyn Parser<S, UnaryFn<V>>>),
    Infix(Assoc, Box<dyn Parser<S, BinaryFn<V>>>),
}

/// One entry of an [`OperatorTable`]: a parser for the operator's token,
/// paired with the semantic action it yields and (once [`Operator::with_prec`]
/// has been called) the precedence used to group it via
/// [`build_operator_table`].
pub struct Operator<S, V> {
    kind: Kind<S, V>,
    prec: Option<f64>,
}

impl<S: InputState + 'static, V: 'static> Operator<S, V> {
    /// Attach a numeric precedence for use with [`build_operator_table`].
    /// Operators placed directly into a hand-built [`OperatorTable`] never
    /// need this.
    pub fn with_prec(mut self, prec: f64) -> Self {
        self.prec = Some(prec);
        self
    }
}

/// Box any parser as a trait object, for storage in an [`Operator`] or a
/// [`Level`].
fn erase<S, V>(mut p: impl Parser<S, V> + 'static) -> Box<dyn Parser<S, V>>
where
    S: InputState + 'static,
    V: 'static,
{
    Box::new(move |s: &mut S| p.parse(s))
}

/// A prefix operator: `p` yields the unary function applied to its operand.
pub fn prefix<S, V, F>(p: impl Parser<S, F> + 'static) -> Operator<S, V>
where
    S: InputState + 'static,
    V: 'static,
    F: Fn(V) -> V + 'static,
{
    Operator {
        kind: Kind::Prefix(erase(crate::combinator::map(p, |f| Rc::new(f) as UnaryFn<V>))),
        prec: None,
    }
}

/// A postfix operator: `p` yields the unary function applied to its operand.
pub fn postfix<S, V, F>(p: impl Parser<S, F> + 'static) -> Operator<S, V>
where
    S: InputState + 'static,
    V: 'static,
    F: Fn(V) -> V + 'static,
{
    Operator {
        kind: Kind::Postfix(erase(crate::combinator::map(p, |f| Rc::new(f) as UnaryFn<V>))),
        prec: None,
    }
}

fn infix<S, V, F>(assoc: Assoc, p: impl Parser<S, F> + 'static) -> Operator<S, V>
where
    S: InputState + 'static,
    V: 'static,
    F: Fn(V, V) -> V + 'static,
{
    Operator {
        kind: Kind::Infix(assoc, erase(crate::combinator::map(p, |f| Rc::new(f) as BinaryFn<V>))),
        prec: None,
    }
}

/// A left-associative infix operator: `p` yields the binary function.
pub fn infix_left<S, V, F>(p: impl Parser<S, F> + 'static) -> Operator<S, V>
where
    S: InputState + 'static,
    V: 'static,
    F: Fn(V, V) -> V + 'static,
{
    infix(Assoc::Left, p)
}

/// A right-associative infix operator: `p` yields the binary function.
pub fn infix_right<S, V, F>(p: impl Parser<S, F> + 'static) -> Operator<S, V>
where
    S: InputState + 'static,
    V: 'static,
    F: Fn(V, V) -> V + 'static,
{
    infix(Assoc::Right, p)
}

/// A non-associative infix operator: `p` yields the binary function.
/// Chaining two non-associative operators at the same precedence
/// (`a == b == c`) is rejected as ambiguous.
pub fn infix_none<S, V, F>(p: impl Parser<S, F> + 'static) -> Operator<S, V>
where
    S: InputState + 'static,
    V: 'static,
    F: Fn(V, V) -> V + 'static,
{
    infix(Assoc::None, p)
}

/// Groups of operators in descending precedence: the first group binds
/// loosest, the last binds tightest.
pub type OperatorTable<S, V> = Vec<Vec<Operator<S, V>>>;

/// Group a flat operator list by exact precedence, sorted descending, with
/// insertion order preserved within a group (and among equal-precedence
/// groups, since the sort is stable). Grounded in
/// `exprparser/oper.go`'s `BuildOperatorTable`.
///
/// # Panics
/// Panics if any operator was constructed without [`Operator::with_prec`].
pub fn build_operator_table<S, V>(ops: Vec<Operator<S, V>>) -> OperatorTable<S, V>
where
    S: InputState + 'static,
    V: 'static,
{
    let mut groups: Vec<(f64, Vec<Operator<S, V>>)> = Vec::new();
    for op in ops {
        let prec = op
            .prec
            .expect("operator passed to build_operator_table has no precedence (call .with_prec)");
        match groups.iter_mut().find(|(p, _)| *p == prec) {
            Some((_, bucket)) => bucket.push(op),
            None => groups.push((prec, vec![op])),
        }
    }
    groups.sort_by(|a, b| b.0.partial_cmp(&a.0).expect("NaN precedence"));
    groups.into_iter().map(|(_, bucket)| bucket).collect()
}

/// `choice(ops)`, falling back to the identity function when `ops` is empty
/// or none match — this is what lets a level with no prefix/postfix
/// operators leave the operand untouched.
fn unary_or_identity<S, V>(ops: Vec<Box<dyn Parser<S, UnaryFn<V>>>>) -> Box<dyn Parser<S, UnaryFn<V>>>
where
    S: InputState + 'static,
    V: 'static,
{
    let identity: UnaryFn<V> = Rc::new(|x| x);
    if ops.is_empty() {
        return erase(returning(identity));
    }
    erase(either(choice(ops), returning(identity)))
}

/// `choice(ops)`, with no fallback — used for the three infix buckets,
/// where "no operator of this associativity here" is a real failure that
/// the caller (the level's `rassoc`/`lassoc`/`nassoc`) must observe.
fn binary_choice<S, V>(ops: Vec<Box<dyn Parser<S, BinaryFn<V>>>>) -> Box<dyn Parser<S, BinaryFn<V>>>
where
    S: InputState + 'static,
    V: 'static,
{
    erase(choice(ops))
}

/// The per-group machinery built by [`build_level`]: the decorated operand
/// parser (`term'` in `spec.md` §4.6) plus the three infix buckets.
struct Level<S, V> {
    term_prime: Box<dyn Parser<S, V>>,
    r_infix: Box<dyn Parser<S, BinaryFn<V>>>,
    l_infix: Box<dyn Parser<S, BinaryFn<V>>>,
    n_infix: Box<dyn Parser<S, BinaryFn<V>>>,
}

fn ambiguous_error<S: InputState>(s: &S, assoc: Assoc) -> ParseError {
    ParseError::new(s.position(), format!("ambiguous use of a {assoc} associative operator"))
}

impl<S: InputState, V: Clone> Level<S, V> {
    /// `rassoc(x) = (op ← r_infix ; y ← rassoc1(term') ; return op(x, y)) |
    /// ambiguous_left | ambiguous_none`. On any failure the position is left
    /// exactly where it started, so the caller ([`Level::level`]) can try
    /// the next associativity.
    fn rassoc(&mut self, s: &mut S, x: V) -> PResult<V> {
        let start = s.save();
        match self.r_infix.parse(s) {
            Ok(op) => {
                let y0 = self.term_prime.parse(s)?;
                let y = self.rassoc1(s, y0)?;
                Ok(op(x, y))
            }
            Err(e) => {
                s.restore(start);
                if self.l_infix.parse(s).is_ok() {
                    s.restore(start);
                    return Err(ambiguous_error(s, Assoc::Left));
                }
                s.restore(start);
                if self.n_infix.parse(s).is_ok() {
                    s.restore(start);
                    return Err(ambiguous_error(s, Assoc::None));
                }
                s.restore(start);
                Err(e)
            }
        }
    }

    /// `rassoc1(x) = rassoc(x) | return x`.
    fn rassoc1(&mut self, s: &mut S, x: V) -> PResult<V> {
        let start = s.save();
        match self.rassoc(s, x.clone()) {
            Ok(v) => Ok(v),
            Err(_) => {
                s.restore(start);
                Ok(x)
            }
        }
    }

    /// `lassoc(x) = (op ← l_infix ; y ← term' ; lassoc1(op(x, y))) |
    /// ambiguous_right | ambiguous_none`, with the `lassoc1` tail-recursion
    /// flattened into a loop.
    fn lassoc(&mut self, s: &mut S, x0: V) -> PResult<V> {
        let start = s.save();
        match self.l_infix.parse(s) {
            Ok(op) => {
                let y = self.term_prime.parse(s)?;
                let mut acc = op(x0, y);
                loop {
                    let step = s.save();
                    match self.l_infix.parse(s) {
                        Ok(op2) => {
                            let y2 = self.term_prime.parse(s)?;
                            acc = op2(acc, y2);
                        }
                        Err(_) => {
                            s.restore(step);
                            break;
                        }
                    }
                }
                Ok(acc)
            }
            Err(e) => {
                s.restore(start);
                if self.r_infix.parse(s).is_ok() {
                    s.restore(start);
                    return Err(ambiguous_error(s, Assoc::Right));
                }
                s.restore(start);
                if self.n_infix.parse(s).is_ok() {
                    s.restore(start);
                    return Err(ambiguous_error(s, Assoc::None));
                }
                s.restore(start);
                Err(e)
            }
        }
    }

    /// `nassoc(x) = op ← n_infix ; y ← term' ; (ambiguous_right |
    /// ambiguous_left | ambiguous_none | return op(x, y))`. Once `n_infix`
    /// and `term'` have both matched, a further operator of any
    /// associativity at this position makes the chain ambiguous — `a == b
    /// == c` has no sensible grouping.
    fn nassoc(&mut self, s: &mut S, x: V) -> PResult<V> {
        let op = self.n_infix.parse(s)?;
        let y = self.term_prime.parse(s)?;
        if let Some(assoc) = self.peek_any_infix(s) {
            return Err(ambiguous_error(s, assoc));
        }
        Ok(op(x, y))
    }

    /// Look ahead (without consuming) for any infix operator at this level,
    /// checked in `right, left, none` order to match the ambiguity-message
    /// priority used throughout this module.
    fn peek_any_infix(&mut self, s: &mut S) -> Option<Assoc> {
        let saved = s.save();
        let found = if self.r_infix.parse(s).is_ok() {
            Some(Assoc::Right)
        } else if {
            s.restore(saved);
            self.l_infix.parse(s).is_ok()
        } {
            Some(Assoc::Left)
        } else if {
            s.restore(saved);
            self.n_infix.parse(s).is_ok()
        } {
            Some(Assoc::None)
        } else {
            None
        };
        s.restore(saved);
        found
    }

    /// `level(x) = rassoc(x) | lassoc(x) | nassoc(x) | return x`.
    fn level(&mut self, s: &mut S, x: V) -> PResult<V> {
        let start = s.save();
        match self.rassoc(s, x.clone()) {
            Ok(v) => return Ok(v),
            Err(_) => s.restore(start),
        }
        match self.lassoc(s, x.clone()) {
            Ok(v) => return Ok(v),
            Err(_) => s.restore(start),
        }
        match self.nassoc(s, x.clone()) {
            Ok(v) => return Ok(v),
            Err(_) => s.restore(start),
        }
        Ok(x)
    }
}

/// Wrap `p` (the parser built from every group so far, loosest-bound first)
/// in a level parser for `group`, per `spec.md` §4.6's "Level parser" — this
/// group's operators bind tighter than everything built so far and looser
/// than everything built after it.
fn build_level<S, V>(p: Box<dyn Parser<S, V>>, group: Vec<Operator<S, V>>) -> Box<dyn Parser<S, V>>
where
    S: InputState + 'static,
    V: Clone + 'static,
{
    let mut prefix_ops = Vec::new();
    let mut postfix_ops = Vec::new();
    let mut r_ops = Vec::new();
    let mut l_ops = Vec::new();
    let mut n_ops = Vec::new();
    for op in group {
        match op.kind {
            Kind::Prefix(p) => prefix_ops.push(p),
            Kind::Postfix(p) => postfix_ops.push(p),
            Kind::Infix(Assoc::Right, p) => r_ops.push(p),
            Kind::Infix(Assoc::Left, p) => l_ops.push(p),
            Kind::Infix(Assoc::None, p) => n_ops.push(p),
        }
    }

    let mut prefix_p = unary_or_identity(prefix_ops);
    let mut postfix_p = unary_or_identity(postfix_ops);
    let mut base = p;
    // term' = do { pre <- prefix_p ; x <- p ; post <- postfix_p ; return post(pre(x)) }
    let term_prime: Box<dyn Parser<S, V>> = erase(move |s: &mut S| {
        let pre = prefix_p.parse(s)?;
        let x = base.parse(s)?;
        let post = postfix_p.parse(s)?;
        Ok(post(pre(x)))
    });

    let mut level = Level {
        term_prime,
        r_infix: binary_choice(r_ops),
        l_infix: binary_choice(l_ops),
        n_infix: binary_choice(n_ops),
    };

    let level_parser = label(
        move |s: &mut S| {
            let x = level.term_prime.parse(s)?;
            level.level(s, x)
        },
        "expect `operator`",
    );
    erase(level_parser)
}

/// Compile an [`OperatorTable`] and a `term` parser for atoms into a full
/// expression parser, folding the table left-to-right (loosest precedence
/// outermost) per `spec.md` §4.6.
pub fn build_expression_parser<S, V>(
    table: OperatorTable<S, V>,
    term: impl Parser<S, V> + 'static,
) -> impl Parser<S, V>
where
    S: InputState + 'static,
    V: Clone + 'static,
{
    let mut p: Box<dyn Parser<S, V>> = erase(term);
    for group in table {
        p = build_level(p, group);
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CharState;
    use crate::stream::char::{char, digit};

    fn digit_value() -> impl Parser<CharState, i64> {
        crate::combinator::map(digit(), |c| c.to_digit(10).unwrap() as i64)
    }

    fn reserved_op(op: char) -> impl Parser<CharState, char> {
        crate::combinator::core::between(
            crate::combinator::repeat::many::<_, _, Vec<_>>(crate::stream::char::space()),
            crate::combinator::repeat::many::<_, _, Vec<_>>(crate::stream::char::space()),
            char(op),
        )
    }

    /// `-2++` and `1+2*(6--3)/3`, the two worked examples this module is
    /// grounded on.
    fn arithmetic() -> impl Parser<CharState, i64> {
        let expr: crate::rule::Rule<CharState, i64> = crate::rule::Rule::new();
        let term = either(
            digit_value(),
            crate::combinator::core::mid(char('('), expr.clone(), char(')')),
        );

        let increment = postfix(crate::combinator::map(
            crate::combinator::core::between(
                crate::stream::char::spaces(),
                crate::stream::char::spaces(),
                crate::stream::char::str("++"),
            ),
            |_| |x: i64| x + 1,
        ));
        let negate = prefix(reserved_op('-').map(|_| |x: i64| -x));
        let mul = infix_left(reserved_op('*').map(|_| |x: i64, y: i64| x * y));
        let div = infix_left(reserved_op('/').map(|_| |x: i64, y: i64| x / y));
        let add = infix_left(reserved_op('+').map(|_| |x: i64, y: i64| x + y));
        let sub = infix_left(reserved_op('-').map(|_| |x: i64, y: i64| x - y));

        let table: OperatorTable<CharState, i64> =
            vec![vec![negate, increment], vec![mul, div], vec![add, sub]];
        let parser = build_expression_parser(table, term);
        expr.define(parser);
        expr
    }

    fn calc(input: &str) -> i64 {
        let mut s: CharState = CharState::new(input);
        let mut p = arithmetic();
        p.parse(&mut s).unwrap()
    }

    #[test]
    fn prefix_and_postfix_compose_as_post_of_pre() {
        assert_eq!(calc("-2++"), -1);
    }

    #[test]
    fn precedence_and_parens_are_honored() {
        assert_eq!(calc("1+2*(6--3)/3"), 7);
    }

    #[test]
    fn build_operator_table_groups_by_descending_precedence() {
        let ops: Vec<Operator<CharState, i64>> = vec![
            infix_left(char('+').map(|_| |x: i64, y: i64| x + y)).with_prec(1.0),
            infix_left(char('*').map(|_| |x: i64, y: i64| x * y)).with_prec(2.0),
            infix_left(char('-').map(|_| |x: i64, y: i64| x - y)).with_prec(1.0),
        ];
        let table = build_operator_table(ops);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].len(), 1); // the '*' group, precedence 2
        assert_eq!(table[1].len(), 2); // '+' then '-', precedence 1, insertion order preserved
    }

    #[test]
    fn non_associative_operator_rejects_chaining() {
        let eq = infix_none(char('=').map(|_| |x: i64, y: i64| if x == y { 1 } else { 0 }));
        let table: OperatorTable<CharState, i64> = vec![vec![eq]];
        let mut p = build_expression_parser(table, digit_value());
        let mut s: CharState = CharState::new("1=1=1");
        let err = p.parse(&mut s).unwrap_err();
        assert_eq!(err.message, "ambiguous use of a none associative operator");
    }
}
