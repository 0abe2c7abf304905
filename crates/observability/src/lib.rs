//! # Observability
//!
//! Tracing + Prometheus metrics for lap comparisons.
//!
//! ## Features
//!
//! - Tracing initialization (JSON / Pretty / Compact)
//! - Optional Prometheus exporter
//! - Comparison metrics and delta-curve summary statistics
//!
//! ## Usage Example
//!
//! ```ignore
//! use observability::{init_with_config, record_comparison_metrics, ObservabilityConfig};
//!
//! init_with_config(&ObservabilityConfig::from_verbosity(1, false))?;
//!
//! let stats = comparator.process()?;
//! if let Some(delta) = comparator.delta() {
//!     record_comparison_metrics(&stats, delta);
//! }
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

// Re-exports
pub use crate::metrics::{
    record_comparison_failure, record_comparison_metrics, DeltaSummary, RunningStats,
    StatsSummary,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_format: LogFormat,
    /// Level used when `RUST_LOG` is unset or ignored
    pub default_log_level: String,
    /// Let `RUST_LOG` override `default_log_level`
    pub honor_rust_log: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            default_log_level: "info".to_string(),
            honor_rust_log: true,
        }
    }
}

impl ObservabilityConfig {
    /// `-v` count and `--quiet` as the CLI takes them.
    ///
    /// Quiet pins the level to `warn` regardless of `RUST_LOG`.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        let (level, honor_rust_log) = match (quiet, verbose) {
            (true, _) => ("warn", false),
            (false, 0) => ("info", true),
            (false, 1) => ("debug", true),
            (false, _) => ("trace", true),
        };
        Self {
            default_log_level: level.to_string(),
            honor_rust_log,
            ..Self::default()
        }
    }

    pub fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = log_format;
        self
    }

    /// Filter directive given the current `RUST_LOG` value.
    pub fn filter_directive(&self, rust_log: Option<&str>) -> String {
        match rust_log.map(str::trim) {
            Some(env) if self.honor_rust_log && !env.is_empty() => env.to_string(),
            _ => self.default_log_level.clone(),
        }
    }
}

/// Log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs
    Json,
    /// Human-readable
    #[default]
    Pretty,
    /// Compact single line
    Compact,
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr, leaving stdout to command output such as JSON reports.
pub fn init_with_config(config: &ObservabilityConfig) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = config.filter_directive(rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{directive}'"))?;

    tracing_subscriber::registry()
        .with(fmt_layer(config.log_format))
        .with(filter)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(
        log_format = ?config.log_format,
        filter = %directive,
        "Observability initialized"
    );
    Ok(())
}

fn fmt_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    }
}

/// Initialize only the Prometheus exporter
///
/// For hosts that already installed their own tracing subscriber.
pub fn init_metrics_only(port: u16) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .context("Failed to install Prometheus recorder")?;

    tracing::info!(port = port, "Prometheus metrics endpoint initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(ObservabilityConfig::from_verbosity(0, false).default_log_level, "info");
        assert_eq!(ObservabilityConfig::from_verbosity(1, false).default_log_level, "debug");
        assert_eq!(ObservabilityConfig::from_verbosity(3, false).default_log_level, "trace");
        assert_eq!(ObservabilityConfig::from_verbosity(2, true).default_log_level, "warn");
    }

    #[test]
    fn test_rust_log_overrides_unless_quiet() {
        let verbose = ObservabilityConfig::from_verbosity(1, false);
        assert_eq!(verbose.filter_directive(Some("comparator=trace")), "comparator=trace");
        assert_eq!(verbose.filter_directive(Some("  ")), "debug");
        assert_eq!(verbose.filter_directive(None), "debug");

        let quiet = ObservabilityConfig::from_verbosity(0, true);
        assert_eq!(quiet.filter_directive(Some("trace")), "warn");
    }

    #[test]
    fn test_directives_parse_as_filters() {
        let config = ObservabilityConfig::default().with_log_format(LogFormat::Json);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(EnvFilter::try_new(config.filter_directive(Some("alignment=debug,info"))).is_ok());
    }
}
