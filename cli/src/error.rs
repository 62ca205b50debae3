//! The driver's top-level error type.
//!
//! Only `Diagnostic` (lexical/syntax errors) has an exact, fixed wording;
//! `Display` forwards it verbatim so the single stderr line it produces is
//! exact. I/O and codegen failures have no such contract, so they get a
//! generic `Error: ` prefix rather than inventing a format to match.

use std::fmt;
use std::io;

use yalcc_codegen::CodegenError;
use yalcc_dsl::diagnostic::Diagnostic;

#[derive(Debug)]
pub enum DriverError {
    Io(io::Error),
    Diagnostic(Diagnostic),
    Codegen(CodegenError),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Diagnostic(d) => d.fmt(f),
            DriverError::Io(e) => write!(f, "Error: {e}"),
            DriverError::Codegen(e) => write!(f, "Error: {e}"),
        }
    }
}

impl std::error::Error for DriverError {}

impl From<Diagnostic> for DriverError {
    fn from(d: Diagnostic) -> Self {
        DriverError::Diagnostic(d)
    }
}

impl From<CodegenError> for DriverError {
    fn from(e: CodegenError) -> Self {
        DriverError::Codegen(e)
    }
}

impl From<io::Error> for DriverError {
    fn from(e: io::Error) -> Self {
        DriverError::Io(e)
    }
}
