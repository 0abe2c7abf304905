//! Piecewise-linear interpolation with flat extrapolation.

/// Interpolates `fp` sampled at non-decreasing positions `xp`.
///
/// Queries before `xp[0]` return `fp[0]` and queries at or past the last
/// position return the last value. Values are never linearly extrapolated
/// beyond the recorded range.
#[derive(Debug, Clone, Copy)]
pub struct Interpolator<'a> {
    xp: &'a [f64],
    fp: &'a [f64],
}

impl<'a> Interpolator<'a> {
    /// Returns `None` for empty input or mismatched lengths.
    ///
    /// `xp` must be non-decreasing; the resampler checks this before building one.
    pub fn new(xp: &'a [f64], fp: &'a [f64]) -> Option<Self> {
        if xp.is_empty() || xp.len() != fp.len() {
            return None;
        }
        Some(Self { xp, fp })
    }

    /// Value at position `x`.
    pub fn at(&self, x: f64) -> f64 {
        let last = self.xp.len() - 1;

        if x.is_nan() {
            return f64::NAN;
        }
        if x <= self.xp[0] {
            return self.fp[0];
        }
        if x >= self.xp[last] {
            return self.fp[last];
        }

        // xp[0] < x < xp[last], so 1 <= upper <= last and xp[upper - 1] <= x < xp[upper].
        // Duplicate positions therefore never produce a zero-width segment.
        let upper = self.xp.partition_point(|&p| p <= x);
        let (x0, x1) = (self.xp[upper - 1], self.xp[upper]);
        let (y0, y1) = (self.fp[upper - 1], self.fp[upper]);

        let t = (x - x0) / (x1 - x0);
        y0 + t * (y1 - y0)
    }

    /// Values at every position in `xs`.
    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.at(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_points_are_linear() {
        let xp = [0.0, 60.0, 120.0];
        let fp = [0.0, 6.0, 11.0];
        let interp = Interpolator::new(&xp, &fp).unwrap();

        assert!((interp.at(30.0) - 3.0).abs() < 1e-12);
        assert!((interp.at(100.0) - (6.0 + 5.0 * 40.0 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn test_exact_sample_positions() {
        let xp = [0.0, 50.0, 100.0];
        let fp = [0.0, 5.0, 10.0];
        let interp = Interpolator::new(&xp, &fp).unwrap();

        assert_eq!(interp.at(0.0), 0.0);
        assert_eq!(interp.at(50.0), 5.0);
        assert_eq!(interp.at(100.0), 10.0);
    }

    #[test]
    fn test_clamps_outside_range() {
        let xp = [10.0, 20.0];
        let fp = [1.0, 3.0];
        let interp = Interpolator::new(&xp, &fp).unwrap();

        assert_eq!(interp.at(0.0), 1.0);
        assert_eq!(interp.at(-5.0), 1.0);
        assert_eq!(interp.at(20.0), 3.0);
        assert_eq!(interp.at(1e6), 3.0);
    }

    #[test]
    fn test_duplicate_positions() {
        // Car stationary for two samples: identical distances.
        let xp = [0.0, 5.0, 5.0, 10.0];
        let fp = [0.0, 1.0, 2.0, 4.0];
        let interp = Interpolator::new(&xp, &fp).unwrap();

        assert_eq!(interp.at(5.0), 2.0);
        assert!((interp.at(2.5) - 0.5).abs() < 1e-12);
        assert!((interp.at(7.5) - 3.0).abs() < 1e-12);
        assert!(interp.at(5.0).is_finite());
    }

    #[test]
    fn test_single_sample_is_constant() {
        let interp = Interpolator::new(&[3.0], &[7.0]).unwrap();
        assert_eq!(interp.at(0.0), 7.0);
        assert_eq!(interp.at(3.0), 7.0);
        assert_eq!(interp.at(9.0), 7.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Interpolator::new(&[], &[]).is_none());
        assert!(Interpolator::new(&[0.0, 1.0], &[0.0]).is_none());
    }

    #[test]
    fn test_nan_query() {
        let interp = Interpolator::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert!(interp.at(f64::NAN).is_nan());
    }
}
