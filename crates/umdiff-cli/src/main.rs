//! umdiff CLI
//!
//! Command-line interface for comparing Ubuntu image manifests

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use umdiff_core::errors::{ExError, UmdiffError};
use umdiff_core::logging_facility::{self, Profile};
use umdiff_core_types::RunId;

mod commands;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "umdiff")]
#[command(version, about = "umdiff - Compare Ubuntu image package manifests", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./umdiff.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log profile: development or production
    #[arg(long, global = true)]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two manifests, or one pair per architecture
    Diff(commands::diff::DiffArgs),
    /// Parse a single manifest and list its packages
    Show(commands::show::ShowArgs),
}

fn main() {
    // Usage errors exit 1 like any other failure; 2 is reserved for --fail-on-diff.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", describe(&e));
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = settings::UmdiffConfig::load(cli.config.as_deref())?;
    let profile = match cli.log_profile {
        Some(profile) => profile,
        None => config.log_profile()?,
    };
    logging_facility::init(profile);

    let run_id = RunId::new();
    let span = tracing::info_span!("umdiff", run_id = %run_id);
    let _guard = span.enter();

    match cli.command {
        Commands::Diff(args) => commands::diff::execute(args, &config),
        Commands::Show(args) => commands::show::execute(args, &config),
    }
}

/// Engine errors print with their stable code; anything else as-is.
fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<UmdiffError>() {
        Some(umdiff_err) => ExError::from(umdiff_err.clone()).to_string(),
        None => format!("{:#}", err),
    }
}
