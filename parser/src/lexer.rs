//! Turns YALCC source text into a `Token` stream.
//!
//! `PROGNAME` vs `VARNAME` is a single lexical class at the character
//! level (both are plain identifiers) and is resolved by grammar position:
//! the identifier immediately following the `Prog` keyword is classified
//! `ProgName`, every other identifier is `VarName`. This keeps the
//! character-level lexer context-free while still producing the two
//! distinct token kinds the parser needs.
use logos::Logos;

use yalcc_dsl::core::SourceLoc;
use yalcc_dsl::diagnostic::LexicalError;

use crate::token::{Token, TokenKind, Value};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Raw {
    #[regex(r"[ \t\r\n]+", logos::skip)]
    Whitespace,

    #[token("Prog")]
    Prog,
    #[token("Is")]
    Is,
    #[token("End")]
    End,
    #[token("If")]
    If,
    #[token("Then")]
    Then,
    #[token("Else")]
    Else,
    #[token("While")]
    While,
    #[token("Do")]
    Do,
    #[token("Print")]
    Print,
    #[token("Input")]
    Input,

    #[token(";")]
    Semi,
    #[token("=")]
    Assign,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrack,
    #[token("}")]
    RBrack,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Times,
    #[token("/")]
    Divide,
    #[token("==")]
    Equal,
    #[token("<=")]
    SmalEq,
    #[token("<")]
    Smaller,
    #[token("->")]
    Implies,
    #[token("|")]
    Pipe,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", priority = 1)]
    Identifier,
    #[regex(r"[0-9]+")]
    Digits,
}

/// Yields `Token`s from source text, one symbol of lookahead at a time
/// (the parser never backs up).
pub struct Lexer<'s> {
    raw: logos::Lexer<'s, Raw>,
    /// Byte offset where each source line begins; `line_starts[i]` is the
    /// start of line `i + 1` (lines are 1-based). `logos::skip` consumes
    /// whitespace, including newlines, inside `raw.next()` before it ever
    /// returns, so a token's own slice never reveals the gap that preceded
    /// it. Looking up the token's absolute span against this table (rather
    /// than walking only the matched slice) is what keeps line/column
    /// tracking correct across skipped whitespace.
    line_starts: Vec<usize>,
    source_len: usize,
    exhausted: bool,
    last_loc: SourceLoc,
    /// Set immediately after lexing the `Prog` keyword; consumed by the
    /// next identifier.
    expect_prog_name: bool,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str) -> Self {
        Lexer {
            raw: Raw::lexer(source),
            line_starts: line_starts(source),
            source_len: source.len(),
            exhausted: false,
            last_loc: SourceLoc::new(1, 0),
            expect_prog_name: false,
        }
    }

    /// Returns the next token, or a `LexicalError` for an unexpected
    /// character. Once the source is exhausted, returns `Eos` on every
    /// subsequent call.
    pub fn next(&mut self) -> Result<Token, LexicalError> {
        if self.exhausted {
            return Ok(Token {
                kind: TokenKind::Eos,
                value: None,
                loc: self.last_loc,
            });
        }

        let result = match self.raw.next() {
            None => {
                self.exhausted = true;
                let loc = self.loc_for_offset(self.source_len);
                self.last_loc = loc;
                return Ok(Token {
                    kind: TokenKind::Eos,
                    value: None,
                    loc,
                });
            }
            Some(result) => result,
        };

        let start = self.loc_for_offset(self.raw.span().start);
        let slice = self.raw.slice();

        let raw = match result {
            Ok(raw) => raw,
            Err(()) => {
                let offending = slice.chars().next().unwrap_or('\u{0}');
                return Err(LexicalError { at: start, offending });
            }
        };

        let (kind, value) = self.classify(raw, slice);
        Ok(Token {
            kind,
            value,
            loc: start,
        })
    }

    /// Turns an absolute byte offset into the source into a (line, column)
    /// pair by locating the line it falls on in `line_starts`.
    fn loc_for_offset(&self, offset: usize) -> SourceLoc {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        SourceLoc::new(line_idx + 1, offset - self.line_starts[line_idx])
    }

    fn classify(&mut self, raw: Raw, slice: &str) -> (TokenKind, Option<Value>) {
        let was_expecting_prog_name = self.expect_prog_name;
        self.expect_prog_name = false;

        match raw {
            Raw::Prog => {
                self.expect_prog_name = true;
                (TokenKind::Prog, None)
            }
            Raw::Is => (TokenKind::Is, None),
            Raw::End => (TokenKind::End, None),
            Raw::If => (TokenKind::If, None),
            Raw::Then => (TokenKind::Then, None),
            Raw::Else => (TokenKind::Else, None),
            Raw::While => (TokenKind::While, None),
            Raw::Do => (TokenKind::Do, None),
            Raw::Print => (TokenKind::Print, None),
            Raw::Input => (TokenKind::Input, None),
            Raw::Semi => (TokenKind::Semi, None),
            Raw::Assign => (TokenKind::Assign, None),
            Raw::LParen => (TokenKind::LParen, None),
            Raw::RParen => (TokenKind::RParen, None),
            Raw::LBrack => (TokenKind::LBrack, None),
            Raw::RBrack => (TokenKind::RBrack, None),
            Raw::Plus => (TokenKind::Plus, None),
            Raw::Minus => (TokenKind::Minus, None),
            Raw::Times => (TokenKind::Times, None),
            Raw::Divide => (TokenKind::Divide, None),
            Raw::Equal => (TokenKind::Equal, None),
            Raw::SmalEq => (TokenKind::SmalEq, None),
            Raw::Smaller => (TokenKind::Smaller, None),
            Raw::Implies => (TokenKind::Implies, None),
            Raw::Pipe => (TokenKind::Pipe, None),
            Raw::Identifier => {
                let kind = if was_expecting_prog_name {
                    TokenKind::ProgName
                } else {
                    TokenKind::VarName
                };
                (kind, Some(Value::Ident(slice.to_string())))
            }
            Raw::Digits => {
                // A literal wider than i32 saturates to i32::MAX rather
                // than panicking or wrapping.
                let n: i32 = slice.parse().unwrap_or(i32::MAX);
                (TokenKind::Number, Some(Value::Number(n)))
            }
            Raw::Whitespace => unreachable!("skipped by the lexer before reaching classify"),
        }
    }
}

/// Byte offsets where each line of `source` begins, starting with `0` for
/// line 1. Used by [`Lexer::loc_for_offset`] to recover line/column from
/// an absolute span without re-walking the source on every token.
fn line_starts(source: &str) -> Vec<usize> {
    let mut starts = vec![0];
    starts.extend(
        source
            .bytes()
            .enumerate()
            .filter(|&(_, b)| b == b'\n')
            .map(|(i, _)| i + 1),
    );
    starts
}
