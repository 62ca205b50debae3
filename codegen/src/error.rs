//! Error type for code generation.
//!
//! The Emitter is total given a well-typed AST: the parser can only ever
//! build ASTs that lower cleanly, so the one error this crate can produce
//! is not a grammar problem but an identifier that cannot be spelled as an
//! LLVM local identifier. Rejecting that identifier outright is simpler
//! and safer than guessing a mangling scheme to escape it.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// A variable name cannot be emitted verbatim as an LLVM local
    /// identifier (`[A-Za-z_][A-Za-z0-9_.]*`).
    UnsafeIdentifier(String),
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::UnsafeIdentifier(name) => {
                write!(f, "variable name '{name}' is not a legal LLVM local identifier")
            }
        }
    }
}

impl std::error::Error for CodegenError {}
