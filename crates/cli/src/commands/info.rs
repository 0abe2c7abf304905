//! `info` command implementation.

use anyhow::{Context, Result};
use comparator::select_lap;
use contracts::{format_lap_time, LapSelection, SessionInfo, SessionProvider};
use serde::Serialize;
use session::InMemorySession;
use tracing::info;

use crate::cli::InfoArgs;
use crate::error::CliError;

/// Session info for JSON output
#[derive(Serialize)]
struct SessionSummary {
    info: SessionInfo,
    drivers: Vec<DriverInfo>,
}

#[derive(Serialize)]
struct DriverInfo {
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fastest_lap: Option<u32>,
    laps: Vec<LapInfo>,
}

#[derive(Serialize)]
struct LapInfo {
    lap_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    lap_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lap_time_secs: Option<f64>,
    samples: usize,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(session = %args.session.display(), "Loading session info");

    if !args.session.exists() {
        return Err(CliError::session_not_found(args.session.display().to_string()).into());
    }

    let session = InMemorySession::load_from_path(&args.session)
        .with_context(|| format!("Failed to load session from {}", args.session.display()))?;

    let summary = build_session_summary(&session);

    if args.json {
        let json =
            serde_json::to_string_pretty(&summary).context("Failed to serialize session info")?;
        println!("{}", json);
    } else {
        print_session_summary(&summary);
    }

    Ok(())
}

fn build_session_summary(session: &dyn SessionProvider) -> SessionSummary {
    let drivers = session
        .drivers()
        .into_iter()
        .map(|driver| {
            let laps = session.laps(&driver);
            let fastest_lap = select_lap(&laps, &driver, LapSelection::Fastest)
                .ok()
                .map(|lap| lap.lap_number.get());

            let laps = laps
                .iter()
                .map(|lap| LapInfo {
                    lap_number: lap.lap_number.get(),
                    lap_time: lap.duration.map(format_lap_time),
                    lap_time_secs: lap.lap_time_secs(),
                    samples: session
                        .car_data(lap)
                        .map(|data| data.samples.len())
                        .unwrap_or(0),
                })
                .collect();

            DriverInfo {
                code: driver.to_string(),
                team: session.team_of(&driver).map(str::to_string),
                fastest_lap,
                laps,
            }
        })
        .collect();

    SessionSummary {
        info: session.session_info().clone(),
        drivers,
    }
}

fn print_session_summary(summary: &SessionSummary) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Lap Delta Session                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("🏁 Session");
    println!("   ├─ Year: {}", summary.info.year);
    println!("   ├─ Event: {}", summary.info.event);
    println!("   └─ Session: {}", summary.info.session);

    println!("\n🏎️  Drivers ({})", summary.drivers.len());
    for (i, driver) in summary.drivers.iter().enumerate() {
        let is_last = i == summary.drivers.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { "   " } else { "│  " };

        println!(
            "   {} {} ({})",
            prefix,
            driver.code,
            driver.team.as_deref().unwrap_or("unknown team")
        );

        for (j, lap) in driver.laps.iter().enumerate() {
            let lap_prefix = if j == driver.laps.len() - 1 { "└─" } else { "├─" };
            let marker = if driver.fastest_lap == Some(lap.lap_number) {
                " *"
            } else {
                ""
            };
            println!(
                "   {}  {} Lap {:>3}  {:>9}  {} samples{}",
                child_prefix,
                lap_prefix,
                lap.lap_number,
                lap.lap_time.as_deref().unwrap_or("no time"),
                lap.samples,
                marker
            );
        }
    }

    println!("\n   * fastest timed lap\n");
}
