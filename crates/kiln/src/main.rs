//! kiln - Developer command line
//!
//! "Describe the table once."
//!
//! Turns one-line column specs into SQL `CREATE TABLE` statements, migration
//! files and Drift table classes, and checks names against the grammars the
//! generators and deploy targets accept.

mod cli;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(output::report_error(&err)),
    }
}

/// RUST_LOG wins; otherwise -v / -vv pick the level
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
