//! # darc-schema CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use darc_cli::check::{run_check_command, run_list_command, CheckArgs, ListArgs};
use darc_cli::EXIT_ERROR;

/// Data-archive schema checker.
///
/// Validates every JSON Schema under the data-archive schema tree against
/// the official JSON Schema Draft 2020-12 meta-schema.
#[derive(Parser, Debug)]
#[command(name = "darc-schema", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate schema documents against the Draft 2020-12 meta-schema.
    Check(CheckArgs),

    /// List the schema documents a check would cover.
    List(ListArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so the report on stdout stays machine-readable.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("darc-schema v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Check(args) => run_check_command(&args),
        Commands::List(args) => run_list_command(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
