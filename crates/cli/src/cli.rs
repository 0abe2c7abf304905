//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Lap Delta - two-driver lap telemetry comparison
#[derive(Parser, Debug)]
#[command(
    name = "lapdelta",
    author,
    version,
    about = "Two-driver lap telemetry comparison",
    long_about = "Aligns two drivers' laps on a common distance grid and reports the\n\
                  time delta along the lap, top speed, throttle usage and lap time gap."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "LAPDELTA_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "LAPDELTA_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two drivers' laps
    Compare(CompareArgs),

    /// Validate configuration file without comparing
    Validate(ValidateArgs),

    /// List drivers and laps of a session file
    Info(InfoArgs),

    /// Write a synthetic session file
    Synth(SynthArgs),
}

/// Arguments for the `compare` command
#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "LAPDELTA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Session data file (overrides `[session] path`)
    #[arg(long, env = "LAPDELTA_SESSION")]
    pub session: Option<PathBuf>,

    /// Reference driver code (overrides `[comparison] driver_a`)
    #[arg(long, env = "LAPDELTA_DRIVER_A")]
    pub driver_a: Option<String>,

    /// Second driver code (overrides `[comparison] driver_b`)
    #[arg(long, env = "LAPDELTA_DRIVER_B")]
    pub driver_b: Option<String>,

    /// Lap number for both drivers (default: each driver's fastest lap)
    #[arg(long, env = "LAPDELTA_LAP")]
    pub lap: Option<u32>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the JSON report to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include aligned channels and the delta curve in the report
    #[arg(long)]
    pub include_channels: bool,

    /// Prometheus metrics port (overrides `[observability] metrics_port`)
    #[arg(long, env = "LAPDELTA_METRICS_PORT")]
    pub metrics_port: Option<u16>,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "lapdelta.toml", env = "LAPDELTA_CONFIG")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Session data file
    #[arg(long, env = "LAPDELTA_SESSION")]
    pub session: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `synth` command
#[derive(Parser, Debug)]
pub struct SynthArgs {
    /// Output session file
    #[arg(short, long, default_value = "session.json")]
    pub output: PathBuf,

    /// Driver as CODE[:TEAM[:PACE]], repeatable
    #[arg(long = "driver", value_name = "CODE[:TEAM[:PACE]]")]
    pub drivers: Vec<String>,

    /// Laps per driver
    #[arg(long, default_value = "3")]
    pub laps: u32,

    /// Car data sample interval in milliseconds
    #[arg(long, default_value = "250")]
    pub sample_ms: u64,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
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
    fn test_parse_compare_overrides() {
        let cli = Cli::try_parse_from([
            "lapdelta",
            "-v",
            "compare",
            "--session",
            "monza.json",
            "--driver-a",
            "LEC",
            "--driver-b",
            "NOR",
            "--lap",
            "14",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Compare(args) => {
                assert_eq!(args.driver_a.as_deref(), Some("LEC"));
                assert_eq!(args.lap, Some(14));
                assert!(args.json);
                assert!(args.config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_synth_drivers() {
        let cli = Cli::try_parse_from([
            "lapdelta",
            "synth",
            "--driver",
            "LEC:Ferrari:1.0",
            "--driver",
            "NOR",
            "--laps",
            "2",
        ])
        .unwrap();

        match cli.command {
            Commands::Synth(args) => {
                assert_eq!(args.drivers, vec!["LEC:Ferrari:1.0", "NOR"]);
                assert_eq!(args.laps, 2);
                assert_eq!(args.sample_ms, 250);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_log_flags_map_to_observability_config() {
        let cli = Cli::try_parse_from([
            "lapdelta",
            "-q",
            "--log-format",
            "json",
            "info",
            "--session",
            "s.json",
        ])
        .unwrap();

        let config = observability::ObservabilityConfig::from_verbosity(cli.verbose, cli.quiet)
            .with_log_format(cli.log_format.into());
        assert_eq!(config.log_format, observability::LogFormat::Json);
        assert_eq!(config.filter_directive(Some("debug")), "warn");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["lapdelta", "-q", "-v", "info", "--session", "s.json"]);
        assert!(result.is_err());
    }
}
