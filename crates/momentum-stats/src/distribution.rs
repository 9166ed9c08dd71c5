//! Return distributions for histogram charts.

use momentum_traits::stats::{finite, mean, sample_std};
use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, Normal};

/// Bins used for the daily return histogram.
pub const DAILY_BINS: usize = 50;

/// Bins used for the monthly return histogram.
pub const MONTHLY_BINS: usize = 45;

/// Points sampled along the fitted normal curve.
pub const CURVE_POINTS: usize = 100;

/// An equal-width histogram normalised to a probability density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges, one more than the number of bins.
    pub edges: Vec<f64>,
    /// Density of each bin: `count / (n * width)`.
    pub density: Vec<f64>,
}

impl Histogram {
    /// Bins the finite `values` into `bins` equal-width buckets spanning
    /// their range. The maximum falls into the last bucket.
    ///
    /// Returns an empty histogram when there are no finite values.
    pub fn density(values: &[f64], bins: usize) -> Self {
        let clean = finite(values);
        let bins = bins.max(1);
        let (Some(lo), Some(hi)) = (
            clean.iter().copied().reduce(f64::min),
            clean.iter().copied().reduce(f64::max),
        ) else {
            return Self {
                edges: Vec::new(),
                density: Vec::new(),
            };
        };

        // a degenerate range still gets a unit-wide bucket around the value
        let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0_usize; bins];
        for v in &clean {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let n = clean.len() as f64;
        Self {
            edges: (0..=bins).map(|i| lo + width * i as f64).collect(),
            density: counts.iter().map(|c| *c as f64 / (n * width)).collect(),
        }
    }

    /// Width of every bin.
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// Centre of every bin.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }
}

/// Samples the normal PDF fitted to `values` (sample mean and deviation) at
/// `points` evenly spaced positions between their minimum and maximum.
///
/// Returns no points when the deviation is undefined or zero.
pub fn normal_curve(values: &[f64], points: usize) -> Vec<(f64, f64)> {
    let clean = finite(values);
    let Ok(normal) = Normal::new(mean(&clean), sample_std(&clean)) else {
        return Vec::new();
    };
    let (Some(lo), Some(hi)) = (
        clean.iter().copied().reduce(f64::min),
        clean.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };

    let steps = points.max(2) - 1;
    (0..=steps)
        .map(|i| {
            let x = lo + (hi - lo) * i as f64 / steps as f64;
            (x, normal.pdf(x))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_density_integrates_to_one() {
        let values: Vec<f64> = (0..1000).map(|i| ((i * 37) % 101) as f64 / 10.0 - 5.0).collect();
        let hist = Histogram::density(&values, DAILY_BINS);

        assert_eq!(hist.edges.len(), DAILY_BINS + 1);
        assert_eq!(hist.density.len(), DAILY_BINS);
        let area: f64 = hist.density.iter().map(|d| d * hist.bin_width()).sum();
        assert_relative_eq!(area, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_max_goes_to_last_bin() {
        let hist = Histogram::density(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        let width = hist.bin_width();
        let counts: Vec<f64> = hist.density.iter().map(|d| d * 5.0 * width).collect();
        assert_relative_eq!(counts[3], 2.0, epsilon = 1e-9);
        assert_eq!(hist.centers()[0], 0.5);
    }

    #[test]
    fn test_constant_and_empty_input() {
        let hist = Histogram::density(&[1.0, 1.0], 10);
        let area: f64 = hist.density.iter().map(|d| d * hist.bin_width()).sum();
        assert_relative_eq!(area, 1.0, epsilon = 1e-9);

        let empty = Histogram::density(&[f64::NAN], 10);
        assert!(empty.density.is_empty());
        assert_eq!(empty.bin_width(), 0.0);
    }

    #[test]
    fn test_normal_curve() {
        let values = vec![-2.0, -1.0, 0.0, 1.0, 2.0];
        let curve = normal_curve(&values, CURVE_POINTS);
        assert_eq!(curve.len(), CURVE_POINTS);
        assert_eq!(curve[0].0, -2.0);
        assert_relative_eq!(curve[CURVE_POINTS - 1].0, 2.0, epsilon = 1e-12);

        // symmetric around the mean
        assert_relative_eq!(curve[0].1, curve[CURVE_POINTS - 1].1, epsilon = 1e-12);

        assert!(normal_curve(&[1.0, 1.0], 10).is_empty());
    }
}
