//! An S-expression grammar — atoms, numbers, strings, quotes, dotted
//! pairs, lists, and line comments — built purely on the public
//! combinator API. Grounded in
//! `examples/original_source/example/lisp/{lisp.go,parser_test.go}` and
//! `spec.md` §8 scenario 4, including that scenario's exact (slightly
//! "improper") list-printer behavior: printing never emits a `" . "`
//! separator when the cdr of a pair is itself a pair, even if that nested
//! pair isn't properly nil-terminated.

use parsec::combinator::core::{between, seq};
use parsec::combinator::{
    choice, either, label, left, many_till, map, mid, right, sep_by, sep_by1, skip_many, try_,
};
use parsec::rule::Rule;
use parsec::state::CharState;
use parsec::stream::char::{any_char, char, lit_str, newline, none_of, regex, space, spaces, str};
use parsec::stream::eof;
use parsec::{Parser, ParserExt};

#[derive(Debug, Clone, PartialEq)]
enum Sexpr {
    Num(f64),
    Str(String),
    Atom(String),
    Pair(Box<Sexpr>, Box<Sexpr>),
    Nil,
}

fn cons(car: Sexpr, cdr: Sexpr) -> Sexpr {
    Sexpr::Pair(Box::new(car), Box::new(cdr))
}

fn atom(name: &str) -> Sexpr {
    Sexpr::Atom(name.to_string())
}

fn quote(v: Sexpr) -> Sexpr {
    cons(atom("quote"), cons(v, Sexpr::Nil))
}

/// Builds a proper list (or `Nil`) from a `Vec` of values, grounded in
/// `lisp.go`'s `s1.parseList`.
fn list(mut xs: Vec<Sexpr>) -> Sexpr {
    if xs.is_empty() {
        return Sexpr::Nil;
    }
    let head = xs.remove(0);
    cons(head, list(xs))
}

/// Grounded in `lisp.go`'s `s1.parseDotList_`.
fn dotted_list(mut xs: Vec<Sexpr>, tail: Sexpr) -> Sexpr {
    if xs.is_empty() {
        return tail;
    }
    let head = xs.remove(0);
    cons(head, dotted_list(xs, tail))
}

impl std::fmt::Display for Sexpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sexpr::Num(n) if *n == n.trunc() => write!(f, "{}", *n as i64),
            Sexpr::Num(n) => write!(f, "{n}"),
            Sexpr::Str(s) => write!(f, "{s:?}"),
            Sexpr::Atom(name) => write!(f, "{name}"),
            Sexpr::Nil => write!(f, "()"),
            Sexpr::Pair(car, cdr) => {
                // Mirrors the original printer exactly: it only emits a `"
                // . "` separator when the final cdr is *not* itself a pair —
                // a nested pair never gets one, even mid-chain. See
                // `examples/original_source/example/lisp/lisp.go::pair.String`.
                write!(f, "(")?;
                let mut car = car.as_ref();
                let mut cdr = cdr.as_ref();
                loop {
                    write!(f, "{car}")?;
                    match cdr {
                        Sexpr::Nil => break,
                        Sexpr::Pair(next_car, next_cdr) => {
                            car = next_car.as_ref();
                            cdr = next_cdr.as_ref();
                            write!(f, " ")?;
                        }
                        other => {
                            write!(f, " . {other}")?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
        }
    }
}

const ATOM_EXCLUDED: &str = "().; \t\r\n\u{c}";

fn tok_paren(c: char) -> impl Parser<CharState, char> {
    map(between(spaces(), spaces(), char(c)), move |_| c)
}

/// `;` followed by everything up to (not including) the next newline or EOF.
fn comment() -> impl Parser<CharState, ()> {
    map(
        right(
            str(";"),
            many_till::<_, _, _, Vec<char>>(any_char(), either(map(newline(), |_| ()), eof())),
        ),
        |_| (),
    )
}

fn sexpr(expr: Rule<CharState, Sexpr>) -> impl Parser<CharState, Sexpr> {
    let num_rule = map(regex(r"[+-]?(?:\d+\.\d+|\d+)"), |s: String| {
        Sexpr::Num(s.parse().unwrap())
    });
    let str_rule = map(lit_str(), |s: String| Sexpr::Str(unquote(&s)));
    let atom_rule = map(
        parsec::combinator::repeat::many1::<_, _, String>(none_of(ATOM_EXCLUDED)),
        Sexpr::Atom,
    );
    let quote_rule = map(right(char('\''), expr.clone()), quote);
    let dot_list_rule = map(
        mid(
            tok_paren('('),
            seq(
                seq(
                    sep_by1::<_, _, _, Vec<_>>(expr.clone(), spaces()),
                    tok_paren('.'),
                    |xs, _| xs,
                ),
                expr.clone(),
                |xs, tail| (xs, tail),
            ),
            tok_paren(')'),
        ),
        |(xs, tail)| dotted_list(xs, tail),
    );
    let list_rule = map(
        mid(
            tok_paren('('),
            sep_by::<_, _, _, Vec<_>>(expr.clone(), spaces()),
            tok_paren(')'),
        ),
        list,
    );
    let comment_rule = map(comment(), |_| Sexpr::Nil);

    label(
        choice(vec![
            Box::new(num_rule),
            Box::new(str_rule),
            Box::new(quote_rule),
            Box::new(comment_rule),
            Box::new(list_rule),
            Box::new(dot_list_rule),
            Box::new(atom_rule),
        ]),
        "expect sexpr",
    )
}

fn unquote(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn parse_program(src: &str) -> Vec<Sexpr> {
    let expr: Rule<CharState, Sexpr> = Rule::new();
    expr.define(sexpr(expr.clone()));

    let sep = || skip_many(either(comment(), map(space(), |_| ())));
    let mut top = left(
        right(try_(sep()), sep_by1::<_, _, _, Vec<Sexpr>>(expr.clone(), sep())),
        eof(),
    );
    let mut s = CharState::new(src);
    top.parse(&mut s).unwrap()
}

fn render(forms: &[Sexpr]) -> String {
    let rendered: Vec<String> = forms.iter().map(|s| s.to_string()).collect();
    format!("[{}]", rendered.join(" "))
}

#[test]
fn parses_define_call_and_quoted_dotted_pair() {
    let src = r#"
(define (fact n)
	(if (= n 0)
		1
		( * n (fact(- n 1))))) ; fact
(fact 10)
; hello world
(display '('"hello\n" . '"world\t!"))
; comment eof
"#;
    let forms = parse_program(src);
    assert_eq!(
        render(&forms),
        r#"[(define (fact n) (if (= n 0) 1 (* n (fact (- n 1))))) (fact 10) (display (quote ((quote "hello\n") quote "world\t!")))]"#
    );
}

#[test]
fn atoms_and_plain_lists_round_trip() {
    let forms = parse_program("(+ 1 2)");
    assert_eq!(render(&forms), "[(+ 1 2)]");
}

#[test]
fn line_comments_are_skipped_between_forms() {
    let forms = parse_program("1 ; one\n2");
    assert_eq!(render(&forms), "[1 2]");
}
