//! CLI entry point for the gauntlet harness.
//!
//! Parses command-line arguments with clap, runs the selected mode against
//! the adjacency graph library with the terminal as console and prompter, and
//! maps fatal outcomes and errors to a failing exit code. Logging is
//! initialized eagerly so subsequent operations can emit structured
//! diagnostics via `tracing`.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use gauntlet_cli::{
    cli::{Cli, CliError, ExecutionSummary, LinePrompter, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Parse CLI arguments and execute the selected mode.
fn try_main() -> Result<ExecutionSummary> {
    let cli = Cli::parse();
    run_cli(cli, io::stdout(), LinePrompter::stdio()).context("failed to execute command")
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match try_main() {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => {
            error!("run ended with a fatal outcome");
            ExitCode::FAILURE
        }
        Err(err) => {
            let (code, library_code) = err
                .downcast_ref::<CliError>()
                .and_then(|cli_error| match cli_error {
                    CliError::Harness(harness) => Some((Some(harness.code()), harness.library_code())),
                    CliError::Flush { .. } => None,
                })
                .unwrap_or((None, None));

            let code_field = code.map(|code| field::display(code.as_str()));
            let library_code_field = library_code.map(|code| field::display(code.as_str()));

            error!(
                error = %err,
                code = code_field,
                library_code = library_code_field,
                "command execution failed"
            );
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
