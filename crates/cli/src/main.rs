//! # Lap Delta CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Config loading and validation
//! - Two-driver lap comparison with text or JSON reports
//! - Session inspection and synthetic session generation

mod cli;
mod commands;
mod error;

use anyhow::Result;
use clap::Parser;
use observability::{init_with_config, ObservabilityConfig};
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_compare, run_info, run_synth, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_with_config(
        &ObservabilityConfig::from_verbosity(cli.verbose, cli.quiet)
            .with_log_format(cli.log_format.clone().into()),
    )?;

    info!(version = env!("CARGO_PKG_VERSION"), "lapdelta starting");

    let result = match &cli.command {
        Commands::Compare(args) => run_compare(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
        Commands::Synth(args) => run_synth(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %format!("{e:#}"), "Command failed");
    }

    result
}
