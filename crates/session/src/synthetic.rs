//! Synthetic car data
//!
//! Deterministic laps over a simplified circuit, for tests and demos without
//! a real data provider.

use std::f64::consts::TAU;
use std::time::Duration;

use contracts::{CarData, CarSample, DriverCode, LapNumber};
use tracing::debug;

/// Hard stop for degenerate profiles
const MAX_SAMPLES: usize = 200_000;
/// Distance ahead used to decide between throttle and brake (m)
const LOOKAHEAD_M: f64 = 60.0;

/// Simplified circuit: straights separated by evenly spaced corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackProfile {
    /// Lap length (m)
    pub length_m: f64,
    /// Number of corners
    pub corners: u32,
    /// Speed on the straights (km/h)
    pub top_speed_kph: f64,
    /// Apex speed (km/h)
    pub min_speed_kph: f64,
}

impl Default for TrackProfile {
    fn default() -> Self {
        Self {
            length_m: 5793.0,
            corners: 11,
            top_speed_kph: 340.0,
            min_speed_kph: 90.0,
        }
    }
}

impl TrackProfile {
    /// Target speed at `distance` for a pace factor of 1.0.
    pub fn target_speed(&self, distance: f64) -> f64 {
        let phase = distance / self.length_m * f64::from(self.corners) * TAU;
        let corner_weight = ((1.0 - phase.cos()) / 2.0).powi(6);
        self.top_speed_kph - (self.top_speed_kph - self.min_speed_kph) * corner_weight
    }
}

/// Generator for one driver's lap.
#[derive(Debug, Clone)]
pub struct SyntheticLap {
    pub driver: DriverCode,
    pub lap_number: LapNumber,
    pub profile: TrackProfile,
    /// Speed multiplier (1.0 = profile speed)
    pub pace: f64,
    /// Time between car data samples
    pub sample_interval: Duration,
}

impl SyntheticLap {
    pub fn new(driver: impl Into<DriverCode>, lap_number: LapNumber) -> Self {
        Self {
            driver: driver.into(),
            lap_number,
            profile: TrackProfile::default(),
            pace: 1.0,
            sample_interval: Duration::from_millis(250),
        }
    }

    pub fn with_profile(mut self, profile: TrackProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_pace(mut self, pace: f64) -> Self {
        self.pace = pace;
        self
    }

    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    /// Generate samples and the resulting lap time.
    ///
    /// The last sample is placed exactly at the moment the lap length is reached.
    pub fn generate(&self) -> (Vec<CarSample>, Duration) {
        let pace = self.pace.max(0.1);
        let dt = self.sample_interval.as_secs_f64().max(1e-3);
        let length = self.profile.length_m.max(0.0);

        let mut samples = Vec::new();
        let mut distance = 0.0;
        let mut elapsed = 0.0;

        loop {
            let speed = self.speed_at(distance, pace);
            samples.push(self.sample(elapsed, distance, speed, pace));

            let step = speed / 3.6 * dt;
            if distance + step >= length || samples.len() >= MAX_SAMPLES {
                let remaining = (length - distance).max(0.0);
                elapsed += remaining / (speed / 3.6);
                let final_speed = self.speed_at(length, pace);
                samples.push(self.sample(elapsed, length, final_speed, pace));
                break;
            }

            distance += step;
            elapsed += dt;
        }

        debug!(
            driver = %self.driver,
            lap = %self.lap_number,
            samples = samples.len(),
            lap_time = elapsed,
            "synthetic lap generated"
        );

        (samples, Duration::from_secs_f64(elapsed))
    }

    /// Generated samples wrapped as provider car data.
    pub fn car_data(&self) -> CarData {
        CarData {
            driver: self.driver.clone(),
            lap_number: self.lap_number,
            samples: self.generate().0,
        }
    }

    fn speed_at(&self, distance: f64, pace: f64) -> f64 {
        (self.profile.target_speed(distance) * pace).max(1.0)
    }

    fn sample(&self, elapsed: f64, distance: f64, speed: f64, pace: f64) -> CarSample {
        let ahead = self.speed_at(distance + LOOKAHEAD_M, pace);
        let (throttle, brake) = if ahead >= speed {
            (100.0, false)
        } else if speed - ahead > 5.0 {
            (0.0, true)
        } else {
            (60.0, false)
        };
        let top = (self.profile.top_speed_kph * pace).max(1.0);
        let gear = (1.0 + speed / top * 7.0).clamp(1.0, 8.0) as u8;

        CarSample {
            time: Duration::from_secs_f64(elapsed),
            speed,
            throttle,
            brake,
            gear,
        }
    }
}
