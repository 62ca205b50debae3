//! Sequences the pipeline stages: token source → parser → AST → Collector
//! → Emitter → IR text. Exposed as a library so the driver's `main.rs`
//! and the integration tests both call the same function.

pub mod cli;
pub mod error;

use yalcc_dsl::ast::Program;

pub use error::DriverError;

/// Parses and lowers `source` to a complete LLVM IR module.
///
/// Runs the parser, then the Collector and the Emitter (both inside
/// [`yalcc_codegen::compile`]), and returns the emitted text. Never
/// touches the filesystem; callers decide where the result goes.
pub fn compile_source(source: &str) -> Result<String, DriverError> {
    let program = parse_source(source)?;
    let ir = yalcc_codegen::compile(&program)?;
    Ok(ir)
}

/// Runs only the parser, for callers (such as `--emit-ast`) that need the
/// AST itself rather than the emitted module.
pub fn parse_source(source: &str) -> Result<Program, DriverError> {
    log::debug!("parsing {} bytes of source", source.len());
    let program = yalcc_parser::parse(source)?;
    log::debug!(
        "parsed program '{}' with {} top-level statement(s)",
        program.name,
        program.body.len()
    );
    Ok(program)
}
