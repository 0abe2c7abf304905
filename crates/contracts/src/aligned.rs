//! Aligned output - resampled series, delta curve and comparison statistics.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

use crate::{Channel, Color, DriverCode, LapNumber};

/// Shared distance axis (meters).
///
/// Cloning shares the same allocation; both drivers' [`AlignedSeries`] hold
/// clones of one grid, which [`DistanceGrid::shares_with`] can verify.
#[derive(Clone, PartialEq)]
pub struct DistanceGrid(Arc<[f64]>);

impl DistanceGrid {
    pub fn from_points(points: Vec<f64>) -> Self {
        Self(Arc::from(points))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last (largest) grid point.
    pub fn max_distance(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// True if both grids are the same allocation, not merely equal values.
    pub fn shares_with(&self, other: &DistanceGrid) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DistanceGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistanceGrid")
            .field("len", &self.0.len())
            .field("first", &self.0.first())
            .field("last", &self.0.last())
            .finish()
    }
}

impl Serialize for DistanceGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for DistanceGrid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<f64>::deserialize(deserializer).map(Self::from_points)
    }
}

/// One driver's telemetry resampled onto the shared grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignedSeries {
    pub driver: DriverCode,
    pub lap_number: LapNumber,

    /// Shared distance axis (same allocation for both drivers)
    pub grid: DistanceGrid,

    /// Elapsed time (seconds)
    pub time: Vec<f64>,
    /// Speed (km/h)
    pub speed: Vec<f64>,
    /// Throttle (0-100 %)
    pub throttle: Vec<f64>,
    /// Brake (0.0-1.0, fractional between samples)
    pub brake: Vec<f64>,
    /// Gear (fractional between samples)
    pub gear: Vec<f64>,

    /// Display color for the rendering layer
    pub color: Color,
}

impl AlignedSeries {
    pub fn channel(&self, channel: Channel) -> &[f64] {
        match channel {
            Channel::Time => &self.time,
            Channel::Speed => &self.speed,
            Channel::Throttle => &self.throttle,
            Channel::Brake => &self.brake,
            Channel::Gear => &self.gear,
        }
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }
}

/// Which driver is ahead at a grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leader {
    /// Driver A reached the point first (delta > 0)
    A,
    /// Driver B reached the point first (delta < 0)
    B,
    Level,
}

/// Signed time gap per grid point: `B.time - A.time` (seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeltaSeries {
    grid: DistanceGrid,
    values: Vec<f64>,
}

impl DeltaSeries {
    pub fn new(grid: DistanceGrid, values: Vec<f64>) -> Self {
        Self { grid, values }
    }

    pub fn grid(&self) -> &DistanceGrid {
        &self.grid
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(distance, delta)` pairs in grid order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.grid
            .as_slice()
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Gap at the last grid point.
    pub fn final_gap(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn leader_at(&self, index: usize) -> Option<Leader> {
        self.values.get(index).map(|&delta| {
            if delta > 0.0 {
                Leader::A
            } else if delta < 0.0 {
                Leader::B
            } else {
                Leader::Level
            }
        })
    }
}

/// Scalar comparison metrics (A relative to B).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonStats {
    /// `max(A.speed) - max(B.speed)` over the aligned grid (km/h)
    pub top_speed_diff: f64,
    /// Mean aligned throttle of driver A (%)
    pub avg_throttle_a: f64,
    /// Mean aligned throttle of driver B (%)
    pub avg_throttle_b: f64,
    /// `duration(A) - duration(B)` in seconds; positive means A was slower
    pub lap_time_diff: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_clone_shares_allocation() {
        let grid = DistanceGrid::from_points(vec![0.0, 1.0, 2.0]);
        let clone = grid.clone();
        let rebuilt = DistanceGrid::from_points(vec![0.0, 1.0, 2.0]);

        assert!(grid.shares_with(&clone));
        assert!(!grid.shares_with(&rebuilt));
        assert_eq!(grid, rebuilt);
        assert_eq!(grid.max_distance(), Some(2.0));
    }

    #[test]
    fn test_grid_serializes_as_array() {
        let grid = DistanceGrid::from_points(vec![0.0, 0.5]);
        assert_eq!(serde_json::to_string(&grid).unwrap(), "[0.0,0.5]");
    }

    #[test]
    fn test_leader_classification() {
        let grid = DistanceGrid::from_points(vec![0.0, 1.0, 2.0]);
        let delta = DeltaSeries::new(grid, vec![0.0, 0.2, -0.1]);

        assert_eq!(delta.leader_at(0), Some(Leader::Level));
        assert_eq!(delta.leader_at(1), Some(Leader::A));
        assert_eq!(delta.leader_at(2), Some(Leader::B));
        assert_eq!(delta.leader_at(3), None);
        assert_eq!(delta.final_gap(), Some(-0.1));
    }

    #[test]
    fn test_delta_iter_pairs_distance() {
        let grid = DistanceGrid::from_points(vec![0.0, 10.0]);
        let delta = DeltaSeries::new(grid, vec![0.0, 0.3]);
        let pairs: Vec<_> = delta.iter().collect();
        assert_eq!(pairs, vec![(0.0, 0.0), (10.0, 0.3)]);
    }
}
