//! # Carousel Viewer CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Page description validation and inspection
//! - Running a page with scripted input
//! - Graceful shutdown handling

mod cli;
mod commands;
mod error;
mod script;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_page, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    observability::init_with_config(observability_config(&cli))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Carousel viewer CLI starting"
    );

    let result = match &cli.command {
        Commands::Run(args) => run_page(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Map CLI verbosity flags onto the tracing setup.
///
/// The metrics exporter is installed by `run` itself, so it is left off here.
fn observability_config(cli: &Cli) -> ObservabilityConfig {
    let default_log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    ObservabilityConfig {
        log_format: cli.log_format.into(),
        default_log_level: default_log_level.to_string(),
        metrics_port: None,
    }
}
