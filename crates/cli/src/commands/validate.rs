//! `validate` command implementation.

use anyhow::{Context, Result};
use config_loader::{ComparisonBlueprint, ConfigLoader};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    driver_a: String,
    driver_b: String,
    selection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_path: Option<String>,
    team_colors: usize,
    driver_colors: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics_port: Option<u16>,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint, args);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    driver_a: blueprint.comparison.driver_a.clone(),
                    driver_b: blueprint.comparison.driver_b.clone(),
                    selection: blueprint.comparison.selection().to_string(),
                    session_path: blueprint
                        .session
                        .path
                        .as_ref()
                        .map(|p| p.display().to_string()),
                    team_colors: blueprint.styling.teams.len(),
                    driver_colors: blueprint.styling.drivers.len(),
                    metrics_port: blueprint.observability.metrics_port,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &ComparisonBlueprint, args: &ValidateArgs) -> Vec<String> {
    let mut warnings = Vec::new();

    match &blueprint.session.path {
        None => warnings.push(
            "No session path configured - `compare` will need --session".to_string(),
        ),
        Some(path) => {
            let resolved = match args.config.parent() {
                Some(base) if path.is_relative() => base.join(path),
                _ => path.clone(),
            };
            if !resolved.exists() {
                warnings.push(format!("Session file '{}' does not exist", resolved.display()));
            }
        }
    }

    if blueprint.styling.teams.is_empty() && blueprint.styling.drivers.is_empty() {
        warnings.push(format!(
            "No team or driver colors configured - both drivers will be drawn in '{}'",
            blueprint.styling.fallback_color
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✅ Configuration is valid: {}", result.config_path);
    } else {
        println!("❌ Configuration is invalid: {}", result.config_path);
    }

    if let Some(ref error) = result.error {
        println!("\n   Error: {}", error);
    }

    if let Some(ref summary) = result.summary {
        println!("\n📋 Summary");
        println!("   ├─ Version: {}", summary.version);
        println!("   ├─ Drivers: {} vs {}", summary.driver_a, summary.driver_b);
        println!("   ├─ Selection: {}", summary.selection);
        println!(
            "   ├─ Session: {}",
            summary.session_path.as_deref().unwrap_or("(not set)")
        );
        println!(
            "   ├─ Colors: {} teams, {} drivers",
            summary.team_colors, summary.driver_colors
        );
        match summary.metrics_port {
            Some(port) => println!("   └─ Metrics: port {}", port),
            None => println!("   └─ Metrics: disabled"),
        }
    }

    if let Some(ref warnings) = result.warnings {
        println!("\n⚠️  Warnings ({})", warnings.len());
        for warning in warnings {
            println!("   - {}", warning);
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(config: PathBuf) -> ValidateArgs {
        ValidateArgs {
            config,
            json: true,
        }
    }

    #[test]
    fn test_valid_config_with_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("lapdelta.toml");
        std::fs::write(
            &config,
            "[session]\npath = \"missing.json\"\n\n[comparison]\ndriver_a = \"VER\"\ndriver_b = \"PER\"\nlap = 5\n",
        )
        .unwrap();

        let result = validate_config(&args(config));
        assert!(result.valid);

        let summary = result.summary.unwrap();
        assert_eq!(summary.selection, "lap 5");
        assert_eq!(result.warnings.map(|w| w.len()), Some(2));
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("lapdelta.toml");
        std::fs::write(
            &config,
            "[comparison]\ndriver_a = \"VER\"\ndriver_b = \"PER\"\nlap = 0\n",
        )
        .unwrap();

        let result = validate_config(&args(config.clone()));
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("comparison.lap"));
        assert!(run_validate(&args(config)).is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = validate_config(&args(PathBuf::from("/nonexistent/lapdelta.toml")));
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("File not found"));
    }
}
