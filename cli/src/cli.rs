//! Command line surface: `<compiler> <path>`, IR to stdout, diagnostics to
//! stderr, exit 0/1.
//!
//! `--output` and `-v`/`--emit-ast` are optional additions on top of that
//! core contract; every one of them defaults to off, so omitting them
//! reproduces the plain `<compiler> <path>` behavior exactly.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "yalccc", about = "Compiles a YALCC source file to LLVM IR")]
pub struct Cli {
    /// Path to the YALCC source file.
    pub file: PathBuf,

    /// Write the emitted module here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Pretty-print the parsed AST to stderr before code generation.
    #[arg(long)]
    pub emit_ast: bool,
}
