//! Lap selection.

use contracts::{ComparisonError, DriverCode, LapSelection, RawLap};

/// Pick one lap of `driver` from `laps`.
///
/// `Fastest` picks the minimum recorded duration; laps without a duration are
/// ignored and ties go to the lower lap number.
///
/// # Errors
/// - `DriverNotFound` if `laps` is empty
/// - `LapNotFound` if the lap number is absent, or no lap has a duration
pub fn select_lap(
    laps: &[RawLap],
    driver: &DriverCode,
    selection: LapSelection,
) -> Result<RawLap, ComparisonError> {
    if laps.is_empty() {
        return Err(ComparisonError::driver_not_found(driver));
    }

    let lap = match selection {
        LapSelection::ByLapNumber(number) => laps.iter().find(|lap| lap.lap_number == number),
        LapSelection::Fastest => laps
            .iter()
            .filter_map(|lap| lap.duration.map(|duration| (duration, lap)))
            .min_by_key(|(duration, lap)| (*duration, lap.lap_number))
            .map(|(_, lap)| lap),
    };

    lap.cloned()
        .ok_or_else(|| ComparisonError::lap_not_found(driver, selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::LapNumber;
    use std::time::Duration;

    fn lap(n: u32, millis: Option<u64>) -> RawLap {
        RawLap::new(
            "VER",
            LapNumber::new(n).unwrap(),
            millis.map(Duration::from_millis),
        )
    }

    fn driver() -> DriverCode {
        DriverCode::from("VER")
    }

    #[test]
    fn test_by_lap_number() {
        let laps = vec![lap(1, Some(92_000)), lap(2, Some(91_000)), lap(3, None)];
        let selected = select_lap(
            &laps,
            &driver(),
            LapSelection::ByLapNumber(LapNumber::new(3).unwrap()),
        )
        .unwrap();
        assert_eq!(selected.lap_number.get(), 3);
        assert_eq!(selected.duration, None);
    }

    #[test]
    fn test_missing_lap_number() {
        let laps = vec![lap(1, Some(92_000))];
        let err = select_lap(
            &laps,
            &driver(),
            LapSelection::ByLapNumber(LapNumber::new(7).unwrap()),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ComparisonError::LapNotFound {
                selection: LapSelection::ByLapNumber(_),
                ..
            }
        ));
    }

    #[test]
    fn test_fastest_skips_untimed_laps() {
        let laps = vec![lap(1, None), lap(2, Some(91_500)), lap(3, Some(90_900)), lap(4, None)];
        let selected = select_lap(&laps, &driver(), LapSelection::Fastest).unwrap();
        assert_eq!(selected.lap_number.get(), 3);
    }

    #[test]
    fn test_fastest_tie_goes_to_earliest_lap() {
        let laps = vec![lap(5, Some(90_000)), lap(2, Some(90_000)), lap(9, Some(95_000))];
        let selected = select_lap(&laps, &driver(), LapSelection::Fastest).unwrap();
        assert_eq!(selected.lap_number.get(), 2);
    }

    #[test]
    fn test_fastest_without_timed_lap() {
        let laps = vec![lap(1, None), lap(2, None)];
        let err = select_lap(&laps, &driver(), LapSelection::Fastest).unwrap_err();
        assert!(matches!(
            err,
            ComparisonError::LapNotFound {
                selection: LapSelection::Fastest,
                ..
            }
        ));
    }

    #[test]
    fn test_no_laps_is_driver_not_found() {
        let err = select_lap(&[], &driver(), LapSelection::Fastest).unwrap_err();
        assert!(matches!(err, ComparisonError::DriverNotFound { .. }));
    }
}
