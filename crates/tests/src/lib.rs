//! # Integration Tests
//!
//! Integration and end-to-end tests.
//!
//! Covers:
//! - Wire shapes of shared contracts
//! - Session file -> comparator -> report, without an external data provider
//! - Config file driven comparisons

#[cfg(test)]
mod contract_tests {
    use std::time::Duration;

    use contracts::{CarSample, LapNumber, LapSelection, RawLap};

    #[test]
    fn test_lap_selection_wire_shape() {
        let fastest = serde_json::to_value(LapSelection::Fastest).unwrap();
        assert_eq!(fastest, "fastest");

        let lap = LapSelection::ByLapNumber(LapNumber::new(7).unwrap());
        let json = serde_json::to_value(lap).unwrap();
        assert_eq!(json["by_lap_number"], 7);
    }

    #[test]
    fn test_durations_are_seconds() {
        let lap = RawLap::new("VER", LapNumber::new(3).unwrap(), Some(Duration::from_millis(81_250)));
        let json = serde_json::to_value(&lap).unwrap();
        assert_eq!(json["duration"], 81.25);

        let sample: CarSample = serde_json::from_str(
            r#"{ "time": 1.5, "speed": 250.0, "throttle": 99.0, "brake": false, "gear": 7 }"#,
        )
        .unwrap();
        assert_eq!(sample.time, Duration::from_millis(1500));
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::path::Path;
    use std::time::Duration;

    use comparator::{Comparator, ComparatorState, ComparisonRequest, Stage};
    use config_loader::ConfigLoader;
    use contracts::{
        Channel, ComparisonError, LapNumber, LapSelection, Leader, SessionInfo, SessionProvider,
    };
    use observability::DeltaSummary;
    use session::{InMemorySession, SyntheticLap, TeamPalette, TrackProfile};

    fn lap(n: u32) -> LapNumber {
        LapNumber::new(n).unwrap()
    }

    /// Three laps per driver; lap 2 is each driver's fastest.
    fn synthetic_session(paces: &[(&str, &str, f64)]) -> InMemorySession {
        let mut session = InMemorySession::new(SessionInfo {
            year: 2024,
            event: "Italian Grand Prix".to_string(),
            session: "Qualifying".to_string(),
        });

        for &(driver, team, pace) in paces {
            session.insert_driver(driver, Some(team));
            for (n, factor) in [(1, 0.990), (2, 1.0), (3, 0.995)] {
                let (samples, lap_time) = SyntheticLap::new(driver, lap(n))
                    .with_pace(pace * factor)
                    .with_sample_interval(Duration::from_millis(200))
                    .generate();
                session.insert_lap(driver, lap(n), Some(lap_time), samples);
            }
        }
        session
    }

    fn write_session(dir: &Path, session: &InMemorySession) -> std::path::PathBuf {
        let path = dir.join("session.json");
        std::fs::write(&path, session.to_json().unwrap()).unwrap();
        path
    }

    /// End-to-end: session file -> InMemorySession -> Comparator -> ComparisonReport
    #[test]
    fn test_e2e_session_file_to_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_session(
            dir.path(),
            &synthetic_session(&[("LEC", "Ferrari", 1.0), ("NOR", "McLaren", 1.005)]),
        );
        let session = InMemorySession::load_from_path(&path).unwrap();
        let palette = TeamPalette::new()
            .with_team("Ferrari", "#E8002D")
            .with_team("McLaren", "#FF8000");

        let mut comparator = Comparator::new(
            &session,
            &palette,
            ComparisonRequest::new("LEC", "NOR", LapSelection::Fastest),
        );
        let stats = comparator.process().unwrap();

        // Fastest laps are selected independently
        let (lap_a, lap_b) = comparator.laps().unwrap();
        assert_eq!(lap_a.lap_number, lap(2));
        assert_eq!(lap_b.lap_number, lap(2));
        let expected_diff = lap_a.lap_time_secs().unwrap() - lap_b.lap_time_secs().unwrap();
        assert!((stats.lap_time_diff - expected_diff).abs() < 1e-9);

        // Every aligned channel and the delta share one grid
        let aligned = comparator.aligned().unwrap();
        let delta = comparator.delta().unwrap();
        assert!(aligned.a.grid.shares_with(&aligned.b.grid));
        assert!(delta.grid().shares_with(&aligned.a.grid));
        for channel in Channel::ALL {
            assert_eq!(aligned.a.channel(channel).len(), delta.len());
            assert_eq!(aligned.b.channel(channel).len(), delta.len());
        }

        // Grid spans [0, shorter lap distance]
        let grid = aligned.grid().as_slice();
        assert_eq!(grid[0], 0.0);
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(delta.values()[0], 0.0);

        // Recomputing from the aligned time channels reproduces the curve
        let recomputed = alignment::compute_delta(&aligned.a, &aligned.b).unwrap();
        assert_eq!(recomputed.values(), delta.values());

        let report = comparator.report(false).unwrap();
        assert_eq!(report.driver_a.color.as_str(), "#E8002D");
        assert_eq!(report.leader, Leader::B);

        // The report's delta summary matches a fresh pass over the curve
        let summary = DeltaSummary::from_delta(delta);
        assert_eq!(summary.delta.count, delta.len() as u64);
        assert_eq!(report.delta.delta.count, summary.delta.count);
        assert_eq!(report.delta.final_gap, delta.final_gap());
        assert_eq!(report.delta.leader(), Leader::B);
        assert!(report.delta.max_gain_b_at.is_some());
        assert!((0.0..=1.0).contains(&report.delta.a_ahead_ratio));
        assert!(report.delta.delta.min <= report.delta.final_gap.unwrap());
        assert_eq!(report.leader_code().map(|d| d.as_str()), Some("NOR"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["session"]["event"], "Italian Grand Prix");
        assert!(json["driver_b"]["lap_time"].as_str().unwrap().contains(':'));
    }

    /// End-to-end: TOML config + session file, explicit lap, styling from config
    #[test]
    fn test_e2e_config_driven_comparison() {
        let dir = tempfile::tempdir().unwrap();
        write_session(
            dir.path(),
            &synthetic_session(&[("VER", "Red Bull Racing", 1.002), ("HAM", "Mercedes", 1.0)]),
        );

        let config_path = dir.path().join("lapdelta.toml");
        std::fs::write(
            &config_path,
            r##"
[session]
path = "session.json"

[comparison]
driver_a = "VER"
driver_b = "HAM"
lap = 3

[styling]
fallback_color = "white"

[styling.teams]
"Red Bull Racing" = "#3671C6"
"##,
        )
        .unwrap();

        let blueprint = ConfigLoader::load_from_path(&config_path).unwrap();
        let session_path = dir
            .path()
            .join(blueprint.session.path.as_ref().unwrap());
        let session = InMemorySession::load_from_path(&session_path).unwrap();
        let palette = TeamPalette::from_config(&blueprint.styling);

        let mut comparator = Comparator::new(
            &session,
            &palette,
            ComparisonRequest::from(&blueprint.comparison),
        )
        .with_fallback_color(blueprint.styling.fallback());

        let stats = comparator.process().unwrap();
        let (lap_a, lap_b) = comparator.laps().unwrap();
        assert_eq!(lap_a.lap_number, lap(3));
        assert_eq!(lap_b.lap_number, lap(3));

        // VER is faster
        assert!(stats.lap_time_diff < 0.0);
        assert!(comparator.delta().unwrap().final_gap().unwrap() > 0.0);

        let aligned = comparator.aligned().unwrap();
        assert_eq!(aligned.a.color.as_str(), "#3671C6");
        assert_eq!(aligned.b.color.as_str(), "white");
    }

    #[test]
    fn test_e2e_identical_laps_have_zero_delta() {
        let session = synthetic_session(&[("SAI", "Ferrari", 1.0), ("LEC", "Ferrari", 1.0)]);
        let palette = TeamPalette::new();

        let mut comparator = Comparator::new(
            &session,
            &palette,
            ComparisonRequest::new("SAI", "LEC", LapSelection::ByLapNumber(lap(1))),
        );
        let stats = comparator.process().unwrap();

        assert_eq!(stats.lap_time_diff, 0.0);
        assert_eq!(stats.top_speed_diff, 0.0);
        assert!(comparator
            .delta()
            .unwrap()
            .values()
            .iter()
            .all(|d| d.abs() < 1e-9));
        assert_eq!(comparator.report(false).unwrap().leader, Leader::Level);
    }

    #[test]
    fn test_e2e_different_track_lengths_use_shorter_lap() {
        let mut session = InMemorySession::new(SessionInfo::default());
        let short = TrackProfile {
            length_m: 3000.0,
            ..TrackProfile::default()
        };
        let long = TrackProfile {
            length_m: 3400.0,
            ..TrackProfile::default()
        };
        for (driver, profile) in [("A", short), ("B", long)] {
            let (samples, lap_time) = SyntheticLap::new(driver, lap(1))
                .with_profile(profile)
                .generate();
            session.insert_lap(driver, lap(1), Some(lap_time), samples);
        }

        let palette = TeamPalette::new();
        let mut comparator = Comparator::new(
            &session,
            &palette,
            ComparisonRequest::new("A", "B", LapSelection::Fastest),
        );
        comparator.process().unwrap();

        let raw_a = session
            .car_data(&session.laps(&"A".into())[0])
            .unwrap()
            .with_distance()
            .unwrap();
        let grid = comparator.aligned().unwrap().grid();
        assert_eq!(grid.len(), raw_a.max_distance().unwrap().floor() as usize);
        assert!((grid.max_distance().unwrap() - raw_a.max_distance().unwrap()).abs() < 1e-9);
    }

    #[test]
    fn test_e2e_missing_telemetry_exposes_nothing() {
        let mut session = synthetic_session(&[("ALO", "Aston Martin", 1.0), ("STR", "Aston Martin", 0.99)]);
        session.insert_lap("STR", lap(4), Some(Duration::from_secs(90)), Vec::new());
        let (samples, lap_time) = SyntheticLap::new("ALO", lap(4)).generate();
        session.insert_lap("ALO", lap(4), Some(lap_time), samples);

        let palette = TeamPalette::new();
        let mut comparator = Comparator::new(
            &session,
            &palette,
            ComparisonRequest::new("ALO", "STR", LapSelection::ByLapNumber(lap(4))),
        );

        let err = comparator.process().unwrap_err();
        assert!(matches!(err, ComparisonError::TelemetryUnavailable { ref driver, .. } if driver == "STR"));
        assert!(matches!(
            comparator.state(),
            ComparatorState::Failed {
                stage: Stage::TelemetryFetch,
                ..
            }
        ));
        assert!(comparator.laps().is_none());
        assert!(comparator.report(true).is_none());
    }
}
