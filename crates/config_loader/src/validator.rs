//! Config validation
//!
//! Rules:
//! - Field constraints declared on the blueprint (`validator` derive)
//! - driver codes are ASCII alphanumeric
//! - driver_a and driver_b differ
//! - every color is `#RRGGBB` or a named color
//! - metrics_port > 0

use contracts::{Color, ComparisonBlueprint, ComparisonError};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Validate a ComparisonBlueprint.
///
/// Returns the first error encountered.
pub fn validate(blueprint: &ComparisonBlueprint) -> Result<(), ComparisonError> {
    validate_constraints(blueprint)?;
    validate_drivers(blueprint)?;
    validate_colors(blueprint)?;
    validate_observability(blueprint)?;
    Ok(())
}

/// Derived field constraints
fn validate_constraints(blueprint: &ComparisonBlueprint) -> Result<(), ComparisonError> {
    blueprint.validate().map_err(|errors| {
        let (field, message) = first_violation(&errors, "")
            .unwrap_or_else(|| ("<unknown>".to_string(), errors.to_string()));
        ComparisonError::config_validation(field, message)
    })
}

/// Depth-first, field-name ordered, so the reported error is deterministic.
fn first_violation(errors: &ValidationErrors, prefix: &str) -> Option<(String, String)> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        let found = match kind {
            ValidationErrorsKind::Field(list) => list.first().map(|e| (path, describe(e))),
            ValidationErrorsKind::Struct(inner) => first_violation(inner, &path),
            ValidationErrorsKind::List(items) => items
                .iter()
                .find_map(|(idx, inner)| first_violation(inner, &format!("{path}[{idx}]"))),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let bounds: Vec<String> = ["min", "max"]
        .iter()
        .filter_map(|key| error.params.get(*key).map(|v| format!("{key}={v}")))
        .collect();

    if bounds.is_empty() {
        format!("failed `{}` check", error.code)
    } else {
        format!("failed `{}` check ({})", error.code, bounds.join(", "))
    }
}

fn validate_drivers(blueprint: &ComparisonBlueprint) -> Result<(), ComparisonError> {
    let comparison = &blueprint.comparison;
    let (driver_a, driver_b) = (comparison.driver_a(), comparison.driver_b());

    for (field, code) in [
        ("comparison.driver_a", &driver_a),
        ("comparison.driver_b", &driver_b),
    ] {
        if !code.is_well_formed() {
            return Err(ComparisonError::config_validation(
                field,
                format!("driver code '{code}' must be ASCII alphanumeric"),
            ));
        }
    }

    // Codes are normalized, so `lec` and `LEC` collide here as they do in a session
    if driver_a == driver_b {
        return Err(ComparisonError::config_validation(
            "comparison.driver_b",
            format!("driver_b must differ from driver_a (both '{driver_a}')"),
        ));
    }

    Ok(())
}

fn validate_colors(blueprint: &ComparisonBlueprint) -> Result<(), ComparisonError> {
    let styling = &blueprint.styling;

    check_color("styling.fallback_color", &styling.fallback_color)?;

    let mut teams: Vec<_> = styling.teams.iter().collect();
    teams.sort();
    for (team, color) in teams {
        check_color(&format!("styling.teams[{team}]"), color)?;
    }

    let mut drivers: Vec<_> = styling.drivers.iter().collect();
    drivers.sort();
    for (driver, color) in drivers {
        check_color(&format!("styling.drivers[{driver}]"), color)?;
    }

    Ok(())
}

fn check_color(field: &str, spec: &str) -> Result<(), ComparisonError> {
    if Color::is_valid_spec(spec) {
        Ok(())
    } else {
        Err(ComparisonError::config_validation(
            field,
            format!("invalid color '{spec}', expected #RRGGBB or a color name"),
        ))
    }
}

fn validate_observability(blueprint: &ComparisonBlueprint) -> Result<(), ComparisonError> {
    if blueprint.observability.metrics_port == Some(0) {
        return Err(ComparisonError::config_validation(
            "observability.metrics_port",
            "metrics_port must be > 0",
        ));
    }
    Ok(())
}
