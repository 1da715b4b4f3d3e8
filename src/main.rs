//! Trains - route table travel queries
//!
//! Loads a directed, weighted route table and answers distance, route count
//! and stop count queries read line by line from a file or the console.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::Cli;
use trains_core::error::{ExitCode as TrainsExitCode, TrainsError};
use trains_core::format::OutputFormat;
use trains_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ if wants_json(env::args().skip(1)) => {
                let usage = TrainsError::UsageError(err.to_string());
                return report_error(&usage, Some(OutputFormat::Json));
            }
            _ => err.exit(),
        },
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::from(TrainsExitCode::Success as u8),
        Err(e) => report_error(&e, cli.format),
    }
}

/// Print a fatal error to stderr and map it to the process exit code
fn report_error(err: &TrainsError, format: Option<OutputFormat>) -> ExitCode {
    match format {
        Some(OutputFormat::Json) => eprintln!("{}", err.to_json()),
        _ => eprintln!("error: {}", err),
    }
    ExitCode::from(err.exit_code() as u8)
}

/// Whether raw arguments ask for JSON output, for errors clap raises before
/// `Cli.format` exists
fn wants_json(args: impl IntoIterator<Item = String>) -> bool {
    let args: Vec<String> = args.into_iter().collect();
    args.iter().any(|a| a == "--format=json")
        || args.windows(2).any(|w| w[0] == "--format" && w[1] == "json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_wants_json() {
        assert!(wants_json(args(&["routes.txt", "--format", "json"])));
        assert!(wants_json(args(&["--format=json", "--bogus"])));
        assert!(!wants_json(args(&["--format", "human"])));
        assert!(!wants_json(args(&["json", "--format"])));
        assert!(!wants_json(args(&[])));
    }
}
