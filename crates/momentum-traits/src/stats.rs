//! Statistical utility functions for return series.
//!
//! This module provides the sample statistics shared by the metric, rolling
//! and distribution code: moments, quantiles and correlation. All functions
//! ignore non-finite inputs.

/// Minimum threshold for standard deviation to avoid division by zero.
/// Values below this threshold are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-12;

/// Collects the finite values of a slice.
pub fn finite(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|x| x.is_finite()).collect()
}

/// Arithmetic mean of the finite values, `NaN` when there are none.
pub fn mean(values: &[f64]) -> f64 {
    let clean = finite(values);
    if clean.is_empty() {
        return f64::NAN;
    }
    clean.iter().sum::<f64>() / clean.len() as f64
}

/// Sample standard deviation (N-1 denominator) of the finite values.
///
/// Returns `NaN` for fewer than two observations.
pub fn sample_std(values: &[f64]) -> f64 {
    let clean = finite(values);
    let n = clean.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = clean.iter().sum::<f64>() / n as f64;
    let variance = clean.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Quantile with linear interpolation between closest ranks.
///
/// `q` is clamped to `[0, 1]`. Returns `NaN` when there are no finite
/// values.
///
/// # Examples
///
/// ```
/// use momentum_traits::stats::quantile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
/// assert!((quantile(&values, 0.5) - 2.5).abs() < 1e-12);
/// ```
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = finite(values);
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.sort_by(f64::total_cmp);

    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Bias-corrected sample skewness (adjusted Fisher-Pearson).
///
/// Returns `NaN` for fewer than three observations and `0` for constant
/// input.
pub fn skew(values: &[f64]) -> f64 {
    let clean = finite(values);
    let n = clean.len() as f64;
    if clean.len() < 3 {
        return f64::NAN;
    }
    let m = clean.iter().sum::<f64>() / n;
    let m2 = clean.iter().map(|x| (x - m).powi(2)).sum::<f64>() / n;
    let m3 = clean.iter().map(|x| (x - m).powi(3)).sum::<f64>() / n;
    if m2.sqrt() < MIN_STD_THRESHOLD {
        return 0.0;
    }
    let g1 = m3 / m2.powf(1.5);
    g1 * (n * (n - 1.0)).sqrt() / (n - 2.0)
}

/// Bias-corrected sample excess kurtosis.
///
/// Returns `NaN` for fewer than four observations and `0` for constant
/// input.
pub fn kurtosis(values: &[f64]) -> f64 {
    let clean = finite(values);
    let n = clean.len() as f64;
    if clean.len() < 4 {
        return f64::NAN;
    }
    let m = clean.iter().sum::<f64>() / n;
    let m2 = clean.iter().map(|x| (x - m).powi(2)).sum::<f64>() / n;
    let m4 = clean.iter().map(|x| (x - m).powi(4)).sum::<f64>() / n;
    if m2.sqrt() < MIN_STD_THRESHOLD {
        return 0.0;
    }
    let g2 = m4 / (m2 * m2) - 3.0;
    ((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0))
}

/// Pearson correlation of two equally long slices.
///
/// Pairs where either side is non-finite are skipped. Returns `NaN` when
/// fewer than two pairs remain or either side is constant.
pub fn correlation(a: &[f64], b: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(x, y)| (*x, *y))
        .collect();
    let n = pairs.len();
    if n < 2 {
        return f64::NAN;
    }

    let mean_a = pairs.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let mean_b = pairs.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in &pairs {
        let da = x - mean_a;
        let db = y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if denom < MIN_STD_THRESHOLD {
        f64::NAN
    } else {
        cov / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(mean(&values), 3.0);
        assert_relative_eq!(sample_std(&values), 2.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_mean_skips_nan() {
        let values = vec![1.0, f64::NAN, 3.0];
        assert_relative_eq!(mean(&values), 2.0);
        assert!(mean(&[]).is_nan());
        assert!(sample_std(&[1.0]).is_nan());
    }

    #[test]
    fn test_quantile_interpolates() {
        let values = vec![4.0, 1.0, 3.0, 2.0];
        assert_relative_eq!(quantile(&values, 0.0), 1.0);
        assert_relative_eq!(quantile(&values, 1.0), 4.0);
        assert_relative_eq!(quantile(&values, 0.25), 1.75, epsilon = 1e-12);
        assert_relative_eq!(quantile(&values, 0.01), 1.03, epsilon = 1e-12);
    }

    #[test]
    fn test_skew_symmetric_is_zero() {
        let values = vec![-2.0, -1.0, 0.0, 1.0, 2.0];
        assert_relative_eq!(skew(&values), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_skew_matches_reference() {
        // pandas.Series([1, 2, 3, 10]).skew()
        let values = vec![1.0, 2.0, 3.0, 10.0];
        assert_relative_eq!(skew(&values), 1.763_632_9, epsilon = 1e-6);
    }

    #[test]
    fn test_kurtosis_matches_reference() {
        // pandas.Series([1, 2, 3, 10]).kurt()
        let values = vec![1.0, 2.0, 3.0, 10.0];
        assert_relative_eq!(kurtosis(&values), 3.265_306_1, epsilon = 1e-6);
    }

    #[test]
    fn test_correlation() {
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![2.0, 4.0, 6.0, 8.0];
        assert_relative_eq!(correlation(&a, &b), 1.0, epsilon = 1e-12);

        let c = vec![4.0, 3.0, 2.0, 1.0];
        assert_relative_eq!(correlation(&a, &c), -1.0, epsilon = 1e-12);

        assert!(correlation(&a, &[1.0, 1.0, 1.0, 1.0]).is_nan());
    }
}
