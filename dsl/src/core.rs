//! Source positions and identifiers shared by every stage of the pipeline.

use std::fmt;

/// A position in the source file: 1-based line, 0-based column (matches the
/// token source contract in the external interfaces).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLoc {
    pub line: usize,
    pub column: usize,
}

impl SourceLoc {
    pub fn new(line: usize, column: usize) -> Self {
        SourceLoc { line, column }
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} and column {}", self.line, self.column)
    }
}

/// A variable or program identifier carried verbatim from source.
///
/// YALCC names are case-sensitive and are copied into LLVM local
/// identifiers without mangling, so no folding happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id(String);

impl Id {
    pub fn from(name: impl Into<String>) -> Self {
        Id(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `self` is safe to emit verbatim as an LLVM local
    /// identifier: `[A-Za-z_][A-Za-z0-9_.]*`. The Emitter rejects
    /// identifiers for which this is false rather than guessing an escape.
    pub fn is_llvm_safe(&self) -> bool {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
