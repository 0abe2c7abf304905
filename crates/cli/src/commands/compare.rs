//! `compare` command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comparator::{Comparator, ComparisonReport, ComparisonRequest};
use config_loader::{ComparisonBlueprint, ConfigLoader};
use contracts::{
    ComparisonConfig, ConfigVersion, ObservabilityOptions, SessionSource, StylingConfig,
};
use session::{InMemorySession, TeamPalette};
use tracing::info;

use crate::cli::CompareArgs;
use crate::error::CliError;

/// Execute the `compare` command
pub fn run_compare(args: &CompareArgs) -> Result<()> {
    let blueprint = resolve_blueprint(args)?;
    let session_path = session_path(&blueprint)?;

    if let Some(port) = args.metrics_port.or(blueprint.observability.metrics_port) {
        observability::init_metrics_only(port)?;
    }

    let session = InMemorySession::load_from_path(&session_path)
        .with_context(|| format!("Failed to load session from {}", session_path.display()))?;
    let palette = TeamPalette::from_config(&blueprint.styling);

    info!(
        session = %session_path.display(),
        driver_a = %blueprint.comparison.driver_a,
        driver_b = %blueprint.comparison.driver_b,
        selection = %blueprint.comparison.selection(),
        "Comparing laps"
    );

    let mut comparator = Comparator::new(
        &session,
        &palette,
        ComparisonRequest::from(&blueprint.comparison),
    )
    .with_fallback_color(blueprint.styling.fallback());

    comparator.process().context("Comparison failed")?;

    let report = comparator
        .report(args.include_channels)
        .context("Comparison finished without results")?;

    if let Some(ref output) = args.output {
        write_report(output, &report)?;
        info!(output = %output.display(), "Report written");
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        println!("{}", report);
    }

    Ok(())
}

/// Load the config file (if any), apply command-line overrides and validate the result.
fn resolve_blueprint(args: &CompareArgs) -> Result<ComparisonBlueprint> {
    let mut blueprint = match &args.config {
        Some(path) => load_config(path)?,
        None => blueprint_from_args(args)?,
    };

    // Apply CLI overrides
    if let Some(ref session) = args.session {
        info!(session = %session.display(), "Overriding session file from CLI");
        blueprint.session.path = Some(session.clone());
    }
    if let Some(ref driver) = args.driver_a {
        info!(driver = %driver, "Overriding driver A from CLI");
        blueprint.comparison.driver_a = driver.clone();
    }
    if let Some(ref driver) = args.driver_b {
        info!(driver = %driver, "Overriding driver B from CLI");
        blueprint.comparison.driver_b = driver.clone();
    }
    if let Some(lap) = args.lap {
        info!(lap, "Overriding lap from CLI");
        blueprint.comparison.lap = Some(lap);
    }

    ConfigLoader::validate(&blueprint).context("Invalid comparison settings")?;
    Ok(blueprint)
}

/// Load a config file; a relative session path is resolved against the config's directory.
fn load_config(path: &Path) -> Result<ComparisonBlueprint> {
    if !path.exists() {
        return Err(CliError::config_not_found(path.display().to_string()).into());
    }

    let mut blueprint = ConfigLoader::load_from_path(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    if let (Some(base), Some(session)) = (path.parent(), blueprint.session.path.as_mut()) {
        if session.is_relative() {
            *session = base.join(&*session);
        }
    }

    Ok(blueprint)
}

fn blueprint_from_args(args: &CompareArgs) -> Result<ComparisonBlueprint> {
    let driver_a = args.driver_a.clone().ok_or(CliError::MissingDriver {
        which: "driver A",
        flag: "driver-a",
    })?;
    let driver_b = args.driver_b.clone().ok_or(CliError::MissingDriver {
        which: "driver B",
        flag: "driver-b",
    })?;

    Ok(ComparisonBlueprint {
        version: ConfigVersion::V1,
        session: SessionSource::default(),
        comparison: ComparisonConfig {
            driver_a,
            driver_b,
            lap: None,
        },
        styling: StylingConfig::default(),
        observability: ObservabilityOptions::default(),
    })
}

fn session_path(blueprint: &ComparisonBlueprint) -> Result<PathBuf> {
    let path = blueprint
        .session
        .path
        .clone()
        .ok_or(CliError::MissingSession)?;

    if !path.exists() {
        return Err(CliError::session_not_found(path.display().to_string()).into());
    }
    Ok(path)
}

fn write_report(path: &Path, report: &ComparisonReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
