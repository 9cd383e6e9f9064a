mod commands;
mod datafile;
mod error;
mod terminal;

use std::process::ExitCode;

use colored::*;
use commands::{CommandLine, execute};
use error::CliError;
use terminal::logging;
use tracing::error;

fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    let cfg = commands.config();

    let _guard = match logging::init(&cfg) {
        Ok(guard) => guard,
        Err(e) => {
            let msg = format!("cannot open log file {}: {e}", cfg.log_file.display());
            eprintln!("{} {}", "[-]".red().bold(), msg);
            return ExitCode::FAILURE;
        }
    };

    match execute(commands.command, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Known failures get a one-line message; anything else keeps its cause chain.
fn report(err: &anyhow::Error) {
    if let Some(core_err) = err.downcast_ref::<routes_core::Error>() {
        match core_err {
            routes_core::Error::Validation { .. } => error!("Validation error: {core_err}"),
            _ => error!("{core_err}"),
        }
    } else if let Some(cli_err) = err.downcast_ref::<CliError>() {
        error!("{cli_err}");
    } else {
        error!("Error: {err:?}");
    }
}
