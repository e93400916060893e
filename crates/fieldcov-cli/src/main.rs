//! # fieldcov CLI entry point
//!
//! Parses command-line arguments, initializes tracing, and runs the
//! validation. Reports go to stdout; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fieldcov_cli::validate::{run_validate, ValidateArgs};

/// Validate that research JSON files cover all fields defined in fields.yaml.
#[derive(Parser, Debug)]
#[command(name = "fieldcov", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    args: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

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

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    tracing::debug!(cwd = %cwd.display(), "fieldcov starting");

    let stdout = std::io::stdout();
    let result = run_validate(&cli.args, &cwd, &mut stdout.lock());

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
