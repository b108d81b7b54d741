//! Primitive parsers over [`TokenState`]: matching by lexical kind or by
//! exact lexeme, both specializations of `satisfy` over the token item.
//!
//! Grounded in `examples/original_source/tokstate/prim.go`.

use crate::parser::{satisfy, Parser};
use crate::state::{Token, TokenState};

/// A token whose `kind` equals `kind`; `name` is used only in error
/// messages (`expect \`name\` actual ...`).
pub fn tok<'t, U: Clone>(kind: u32, name: impl Into<String>) -> impl Parser<TokenState<'t, U>, &'t Token> {
    satisfy(move |t: &&Token| t.kind == kind, name.into())
}

/// A token whose exact `lexeme` equals `lexeme`.
pub fn str<'t, U: Clone>(lexeme: impl Into<String>) -> impl Parser<TokenState<'t, U>, &'t Token> {
    let lexeme = lexeme.into();
    satisfy(move |t: &&Token| t.lexeme == lexeme, format!("`{lexeme}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks() -> Vec<Token> {
        vec![Token::new(1, "let", 0, 0), Token::new(2, "x", 0, 4)]
    }

    #[test]
    fn tok_matches_by_kind() {
        let ts = toks();
        let mut s: TokenState = TokenState::new(&ts);
        let t = tok(1, "let").parse(&mut s).unwrap();
        assert_eq!(t.lexeme, "let");
        assert!(tok::<()>(1, "let").parse(&mut s).is_err());
    }

    #[test]
    fn str_matches_by_lexeme() {
        let ts = toks();
        let mut s: TokenState = TokenState::new(&ts);
        let t = str("let").parse(&mut s).unwrap();
        assert_eq!(t.kind, 1);
    }
}
