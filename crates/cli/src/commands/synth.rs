//! `synth` command implementation.

use anyhow::{Context, Result};
use contracts::{LapNumber, SessionInfo};
use session::{InMemorySession, SyntheticLap};
use std::time::Duration;
use tracing::info;

use crate::cli::SynthArgs;
use crate::error::CliError;

const DEFAULT_DRIVERS: [&str; 2] = ["LEC:Ferrari:1.0", "NOR:McLaren:1.004"];

/// One `--driver CODE[:TEAM[:PACE]]` entry
#[derive(Debug, Clone, PartialEq)]
struct DriverSpec {
    code: String,
    team: Option<String>,
    pace: f64,
}

impl DriverSpec {
    fn parse(spec: &str) -> Result<Self, CliError> {
        let mut parts = spec.split(':');
        let code = parts.next().unwrap_or_default().trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CliError::invalid_driver_spec(
                spec,
                "driver code must be non-empty and alphanumeric",
            ));
        }

        let team = parts
            .next()
            .map(str::trim)
            .filter(|team| !team.is_empty())
            .map(str::to_string);

        let pace = match parts.next() {
            Some(pace) => pace
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite() && *p > 0.0)
                .ok_or_else(|| CliError::invalid_driver_spec(spec, "pace must be a positive number"))?,
            None => 1.0,
        };

        if parts.next().is_some() {
            return Err(CliError::invalid_driver_spec(spec, "too many ':' separated fields"));
        }

        Ok(Self {
            code: code.to_string(),
            team,
            pace,
        })
    }
}

/// Execute the `synth` command
pub fn run_synth(args: &SynthArgs) -> Result<()> {
    let session = build_session(args)?;
    let json = session.to_json().context("Failed to serialize session")?;

    std::fs::write(&args.output, json)
        .with_context(|| format!("Failed to write session to {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        drivers = session.document().drivers.len(),
        laps = args.laps,
        "Synthetic session written"
    );
    Ok(())
}

fn build_session(args: &SynthArgs) -> Result<InMemorySession> {
    let specs = if args.drivers.is_empty() {
        DEFAULT_DRIVERS
            .iter()
            .map(|spec| DriverSpec::parse(spec))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        args.drivers
            .iter()
            .map(|spec| DriverSpec::parse(spec))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut session = InMemorySession::new(SessionInfo {
        year: 2024,
        event: "Synthetic Grand Prix".to_string(),
        session: "Practice".to_string(),
    });
    let interval = Duration::from_millis(args.sample_ms.max(1));

    for spec in &specs {
        session.insert_driver(spec.code.as_str(), spec.team.as_deref());

        for n in 1..=args.laps {
            let Some(lap_number) = LapNumber::new(n) else {
                continue;
            };
            let (samples, lap_time) = SyntheticLap::new(spec.code.as_str(), lap_number)
                .with_pace(spec.pace * lap_pace_factor(n))
                .with_sample_interval(interval)
                .generate();
            session.insert_lap(spec.code.as_str(), lap_number, Some(lap_time), samples);
        }
    }

    Ok(session)
}

/// Deterministic lap-to-lap variation within 1 %.
fn lap_pace_factor(lap: u32) -> f64 {
    0.995 + 0.0025 * f64::from((lap * 3) % 5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::SessionProvider;
    use std::path::PathBuf;

    fn args(drivers: &[&str], laps: u32) -> SynthArgs {
        SynthArgs {
            output: PathBuf::from("session.json"),
            drivers: drivers.iter().map(|d| d.to_string()).collect(),
            laps,
            sample_ms: 500,
        }
    }

    #[test]
    fn test_parse_driver_spec() {
        assert_eq!(
            DriverSpec::parse("VER:Red Bull Racing:1.01").unwrap(),
            DriverSpec {
                code: "VER".into(),
                team: Some("Red Bull Racing".into()),
                pace: 1.01,
            }
        );
        assert_eq!(DriverSpec::parse("HAM").unwrap().pace, 1.0);
        assert_eq!(DriverSpec::parse("HAM::0.99").unwrap().team, None);
        assert!(DriverSpec::parse("").is_err());
        assert!(DriverSpec::parse("HAM:Mercedes:fast").is_err());
        assert!(DriverSpec::parse("HAM:Mercedes:-1").is_err());
        assert!(DriverSpec::parse("HAM:Mercedes:1.0:x").is_err());
    }

    #[test]
    fn test_default_drivers() {
        let session = build_session(&args(&[], 2)).unwrap();
        assert_eq!(session.drivers().len(), 2);
        assert_eq!(session.team_of(&"NOR".into()), Some("McLaren"));
        assert_eq!(session.laps(&"LEC".into()).len(), 2);
    }

    #[test]
    fn test_laps_are_timed_and_have_car_data() {
        let session = build_session(&args(&["ALO:Aston Martin"], 3)).unwrap();
        for lap in session.laps(&"ALO".into()) {
            assert!(lap.duration.is_some());
            assert!(session.car_data(&lap).unwrap().samples.len() > 2);
        }
    }

    #[test]
    fn test_run_synth_writes_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(&["PIA:McLaren"], 1);
        args.output = dir.path().join("synthetic.json");

        run_synth(&args).unwrap();

        let loaded = InMemorySession::load_from_path(&args.output).unwrap();
        assert_eq!(loaded.session_info().event, "Synthetic Grand Prix");
        assert_eq!(loaded.laps(&"PIA".into()).len(), 1);
    }
}
