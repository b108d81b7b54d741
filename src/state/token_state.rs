use super::{InputState, UserData};
use crate::error::Position;

/// A pre-lexed token, the minimal shape the external lexer must produce.
///
/// `kind == 0` is reserved and unused; positive integers identify lexical
/// categories assigned by the (external) lexer. Grounded in
/// `examples/original_source/tokstate/prim.go`'s use of `*lexer.Token{Kind,
/// Lexeme, Line, Col}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lexical category. `0` is reserved-unused.
    pub kind: u32,
    /// The exact source text this token was lexed from.
    pub lexeme: String,
    /// 0-based line of the token's first character.
    pub line: usize,
    /// 0-based column of the token's first character.
    pub column: usize,
}

impl Token {
    /// Construct a token. `kind` must be nonzero for it to ever match
    /// [`tok`][crate::stream::token::tok].
    pub fn new(kind: u32, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

/// A cursor over a slice of pre-lexed [`Token`]s.
///
/// Unlike [`CharState`][super::CharState]/[`ByteState`][super::ByteState],
/// line/column are not computed by the cursor: they mirror the lexed
/// token's own `line`/`column`, as specified in `spec.md` §3. The `index`
/// component of [`Position`] still counts tokens consumed.
#[derive(Debug, Clone)]
pub struct TokenState<'t, U = ()> {
    tokens: &'t [Token],
    pos: Position,
    user_data: U,
}

impl<'t, U: Default> TokenState<'t, U> {
    /// Build a fresh cursor over a pre-lexed token slice.
    pub fn new(tokens: &'t [Token]) -> Self {
        TokenState {
            tokens,
            pos: Position::START,
            user_data: U::default(),
        }
    }
}

impl<'t, U> TokenState<'t, U> {
    /// The full token slice, unaffected by the cursor's progress.
    pub fn tokens(&self) -> &'t [Token] {
        self.tokens
    }
}

impl<'t, U: Clone> InputState for TokenState<'t, U> {
    type Item = &'t Token;

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos.index)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let tok = self.peek()?;
        self.pos.index += 1;
        self.pos.line = tok.line;
        self.pos.column = tok.column;
        Some(tok)
    }

    fn save(&self) -> Position {
        self.pos
    }

    fn restore(&mut self, position: Position) {
        self.pos = position;
    }

    fn eof_offset(&self) -> usize {
        self.tokens.len() - self.pos.index
    }
}

impl<'t, U: Clone> UserData<U> for TokenState<'t, U> {
    fn put(&mut self, value: U) {
        self.user_data = value;
    }

    fn get(&self) -> U {
        self.user_data.clone()
    }
}
