//! Diagnostics for the two error kinds the pipeline can produce.
//!
//! Unlike a general-purpose diagnostic renderer, the wording here is fixed:
//! the CLI prints exactly one line to stderr in the form given by
//! [`Diagnostic`]'s `Display` impl. There is no recovery and no warnings:
//! the first diagnostic aborts the pipeline.

use std::fmt;

use crate::core::SourceLoc;

/// An unexpected character or malformed literal from the token source.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalError {
    pub at: SourceLoc,
    pub offending: char,
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexical Error at {}: unexpected character '{}'",
            self.at, self.offending
        )
    }
}

/// The current token's kind was not in the expected set for the
/// non-terminal being parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub at: SourceLoc,
    /// The non-terminal being parsed when the mismatch was found.
    pub non_terminal: &'static str,
    /// Token kinds acceptable at this point, in a stable, readable order.
    pub expected: Vec<&'static str>,
    /// The current token's textual value (or its kind's spelling, for
    /// tokens with no carried value).
    pub got: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parsing Error at {} trying to parse {}: expected {}, but got {}",
            self.at,
            self.non_terminal,
            self.expected.join(", "),
            self.got
        )
    }
}

/// Either error kind the pipeline can produce. The Collector and Emitter
/// never produce diagnostics of their own: both operate on an AST that
/// already parsed successfully, so there is nothing left for them to reject.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    Lexical(LexicalError),
    Syntax(SyntaxError),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Lexical(e) => e.fmt(f),
            Diagnostic::Syntax(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Diagnostic {}

impl From<LexicalError> for Diagnostic {
    fn from(e: LexicalError) -> Self {
        Diagnostic::Lexical(e)
    }
}

impl From<SyntaxError> for Diagnostic {
    fn from(e: SyntaxError) -> Self {
        Diagnostic::Syntax(e)
    }
}
