//! [`Rule`]: a forward-declared parser cell for recursive grammars.
//!
//! Grounded in `examples/original_source/parserc.go`'s `SyntaxRule`, a
//! `Parser` whose `Pattern` field is assigned after construction so that
//! two mutually-recursive productions can each refer to the other:
//!
//! ```go
//! type SyntaxRule struct { Pattern Parser }
//! func (r *SyntaxRule) Parse(s State) (interface{}, error) { return r.Pattern.Parse(s) }
//! ```
//!
//! Rust has no null pointer to fill in later, so [`Rule::new`] starts empty
//! and panics if used before [`Rule::define`] — the equivalent of the Go
//! version's nil-`Pattern` crash, just earlier and with a clearer message.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::PResult;
use crate::parser::{BoxParser, Parser};
use crate::state::InputState;

/// A parser cell that can be referenced before its definition is known.
///
/// Clone a `Rule` to hand out multiple handles to the same cell (it is
/// `Rc`-backed); call [`define`][Rule::define] exactly once, typically right
/// after building every production that may recurse into it.
pub struct Rule<S, V> {
    cell: Rc<RefCell<Option<BoxParser<S, V>>>>,
}

impl<S, V> Clone for Rule<S, V> {
    fn clone(&self) -> Self {
        Rule {
            cell: self.cell.clone(),
        }
    }
}

impl<S: InputState + 'static, V: 'static> Rule<S, V> {
    /// An undefined rule. Parsing through it before [`define`][Rule::define]
    /// is called is a logic error in the grammar construction, not a parse
    /// failure, so it panics rather than returning a [`ParseError`].
    pub fn new() -> Self {
        Rule {
            cell: Rc::new(RefCell::new(None)),
        }
    }

    /// Fill in this rule's production. Intended to be called once, after
    /// building a parser expression that may reference `self.clone()`
    /// recursively.
    pub fn define(&self, p: impl Parser<S, V> + 'static) {
        *self.cell.borrow_mut() = Some(crate::parser::boxed(p));
    }
}

impl<S: InputState + 'static, V: 'static> Default for Rule<S, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: InputState, V> Parser<S, V> for Rule<S, V> {
    fn parse(&mut self, state: &mut S) -> PResult<V> {
        let mut slot = self.cell.borrow_mut();
        match slot.as_mut() {
            Some(p) => p(state),
            None => panic!("Rule used before define() was called"),
        }
    }
}
