//! The token model: the closed set of token kinds, the value a token may
//! carry, and the `Token` type itself.

use std::fmt;

use yalcc_dsl::core::SourceLoc;

/// The closed set of token kinds. `Epsilon` is a parser-internal
/// placeholder (used only when describing FIRST sets) and never appears
/// in a token stream; it has no variant here because `next()` never
/// produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Prog,
    Is,
    End,
    ProgName,
    VarName,
    Number,
    Semi,
    Assign,
    LParen,
    RParen,
    /// Spelled `{`. Named `LBrack` rather than `LBrace` to match how the
    /// grammar refers to block delimiters.
    LBrack,
    /// Spelled `}`.
    RBrack,
    Plus,
    Minus,
    Times,
    Divide,
    If,
    Then,
    Else,
    While,
    Do,
    Print,
    Input,
    Equal,
    SmalEq,
    Smaller,
    Implies,
    Pipe,
    Eos,
}

impl TokenKind {
    /// A human-readable spelling used in diagnostics' "expected" sets.
    pub fn spelling(self) -> &'static str {
        match self {
            TokenKind::Prog => "Prog",
            TokenKind::Is => "Is",
            TokenKind::End => "End",
            TokenKind::ProgName => "<program name>",
            TokenKind::VarName => "<identifier>",
            TokenKind::Number => "<number>",
            TokenKind::Semi => ";",
            TokenKind::Assign => "=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrack => "{",
            TokenKind::RBrack => "}",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Times => "*",
            TokenKind::Divide => "/",
            TokenKind::If => "If",
            TokenKind::Then => "Then",
            TokenKind::Else => "Else",
            TokenKind::While => "While",
            TokenKind::Do => "Do",
            TokenKind::Print => "Print",
            TokenKind::Input => "Input",
            TokenKind::Equal => "==",
            TokenKind::SmalEq => "<=",
            TokenKind::Smaller => "<",
            TokenKind::Implies => "->",
            TokenKind::Pipe => "|",
            TokenKind::Eos => "<end of input>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// The value a token carries, when its kind has one: only identifiers
/// and numeric literals carry one, everything else is determined fully
/// by its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Ident(String),
    Number(i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<Value>,
    pub loc: SourceLoc,
}

impl Token {
    /// The token's value formatted for the "but got <value>" slot of a
    /// syntax diagnostic: the carried value when present, else the
    /// kind's spelling.
    pub fn display_value(&self) -> String {
        match &self.value {
            Some(Value::Ident(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            None => self.kind.spelling().to_string(),
        }
    }
}
