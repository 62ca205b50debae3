use std::fs;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use yalccc::cli::Cli;
use yalccc::error::DriverError;
use yalccc::parse_source;

fn main() -> ExitCode {
    let args = Cli::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(args: &Cli) -> Result<(), DriverError> {
    let contents = fs::read_to_string(&args.file)?;
    let program = parse_source(&contents)?;

    if args.emit_ast {
        eprintln!("{program:#?}");
    }

    let ir = yalcc_codegen::compile(&program)?;

    match &args.output {
        Some(path) => fs::write(path, ir)?,
        None => std::io::stdout().write_all(ir.as_bytes())?,
    }

    Ok(())
}
