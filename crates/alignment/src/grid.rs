//! Shared distance grid construction.

use contracts::{ComparisonError, DistanceGrid};

/// Smallest grid size that still contains both endpoints.
const MIN_GRID_POINTS: usize = 2;

/// `n` evenly spaced values from `start` to `stop`, both inclusive.
///
/// The last value is exactly `stop`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            points[n - 1] = stop;
            points
        }
    }
}

/// Build the common grid for two laps of length `max_a` and `max_b` meters.
///
/// The grid ends at the shorter lap distance and has `floor(max_dist)` points
/// (about 1 m spacing), never fewer than two.
///
/// # Errors
/// `InsufficientData` when the shorter lap covers less than one meter.
pub fn build_grid(max_a: f64, max_b: f64) -> Result<DistanceGrid, ComparisonError> {
    let max_dist = max_a.min(max_b);

    if !max_dist.is_finite() || max_dist < 1.0 {
        return Err(ComparisonError::insufficient_data(
            "distance grid",
            format!("shortest lap distance is {max_dist} m, need at least 1 m"),
        ));
    }

    let n = (max_dist.floor() as usize).max(MIN_GRID_POINTS);
    Ok(DistanceGrid::from_points(linspace(0.0, max_dist, n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let points = linspace(0.0, 100.0, 100);
        assert_eq!(points.len(), 100);
        assert_eq!(points[0], 0.0);
        assert_eq!(points[99], 100.0);
        assert!((points[1] - 100.0 / 99.0).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_degenerate_sizes() {
        assert!(linspace(0.0, 5.0, 0).is_empty());
        assert_eq!(linspace(0.0, 5.0, 1), vec![0.0]);
        assert_eq!(linspace(0.0, 5.0, 2), vec![0.0, 5.0]);
    }

    #[test]
    fn test_grid_uses_shorter_lap() {
        let grid = build_grid(100.0, 120.0).unwrap();
        assert_eq!(grid.len(), 100);
        assert_eq!(grid.max_distance(), Some(100.0));

        let grid = build_grid(5793.7, 5790.2).unwrap();
        assert_eq!(grid.len(), 5790);
        assert_eq!(grid.max_distance(), Some(5790.2));
    }

    #[test]
    fn test_grid_rejects_sub_meter_lap() {
        let err = build_grid(0.5, 100.0).unwrap_err();
        assert!(matches!(err, ComparisonError::InsufficientData { .. }));
    }

    #[test]
    fn test_grid_short_lap_keeps_both_endpoints() {
        let grid = build_grid(1.5, 10.0).unwrap();
        assert_eq!(grid.as_slice(), &[0.0, 1.5]);
    }

    #[test]
    fn test_grid_rejects_nan() {
        assert!(build_grid(f64::NAN, f64::NAN).is_err());
    }
}
