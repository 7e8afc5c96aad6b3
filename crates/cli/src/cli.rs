//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Carousel Viewer - run and inspect image carousel pages
#[derive(Parser, Debug)]
#[command(
    name = "carousel-viewer",
    author,
    version,
    about = "Image carousel and overlay viewer",
    long_about = "Loads a page description (TOML or JSON), initialises every carousel root,\n\
                  rotates them on their timers and routes scripted input to the carousels\n\
                  and the shared overlay."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "CAROUSEL_VIEWER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "CAROUSEL_VIEWER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a page until the duration elapses or Ctrl+C
    Run(RunArgs),

    /// Validate a page description without running it
    Validate(ValidateArgs),

    /// Display how each carousel root will be set up
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to the page description (TOML or JSON)
    #[arg(short, long, default_value = "page.toml", env = "CAROUSEL_VIEWER_PAGE")]
    pub page: PathBuf,

    /// Override the origin used for manifest and preload requests
    #[arg(long, env = "CAROUSEL_VIEWER_ORIGIN")]
    pub origin: Option<String>,

    /// Stop after this many seconds (0 = until Ctrl+C)
    #[arg(long, default_value = "0", env = "CAROUSEL_VIEWER_DURATION")]
    pub duration: u64,

    /// JSON-lines file of timed input events to replay
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Log a page snapshot every N seconds (0 = disabled)
    #[arg(long, default_value = "0")]
    pub snapshot_interval: u64,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "CAROUSEL_VIEWER_METRICS_PORT")]
    pub metrics_port: u16,

    /// Validate the page and exit without running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the page description to validate
    #[arg(short, long, default_value = "page.toml")]
    pub page: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to the page description
    #[arg(short, long, default_value = "page.toml")]
    pub page: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show raw root attributes
    #[arg(long)]
    pub attributes: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["carousel-viewer", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.page, PathBuf::from("page.toml"));
        assert_eq!(args.duration, 0);
        assert_eq!(args.metrics_port, 0);
        assert!(args.script.is_none());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["carousel-viewer", "-q", "-v", "validate"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_info_flags() {
        let cli = Cli::try_parse_from(["carousel-viewer", "info", "-p", "site.json", "--json"]).unwrap();
        let Commands::Info(args) = cli.command else {
            panic!("expected info");
        };
        assert_eq!(args.page, PathBuf::from("site.json"));
        assert!(args.json);
        assert!(!args.attributes);
    }
}
