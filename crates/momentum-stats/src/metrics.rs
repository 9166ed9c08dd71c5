//! Summary performance metrics.
//!
//! This module computes the key-metrics table shown on the dashboard:
//! - Return measures: CAGR, expected daily/monthly/yearly return, cumulative return
//! - Risk-adjusted ratios: Sharpe, Sortino, Calmar, probabilistic and smart ratios
//! - Risk measures: max drawdown, volatility, value-at-risk, expected shortfall, ulcer index
//! - Distribution shape: skew, kurtosis, tail ratio, gain/pain ratio
//!
//! Ratios are annualized with `sqrt(periods_per_year)`; CAGR counts calendar
//! years as 365 days.

use momentum_traits::{
    TimeSeries,
    stats::{correlation, kurtosis, mean, quantile, sample_std, skew},
};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::{
    resample::{Frequency, resample},
    transform::{compounded, drawdown_series},
};

/// Calendar days per year used by CAGR.
const DAYS_PER_YEAR: f64 = 365.0;

/// Configuration for metrics calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Number of trading days per year for annualization
    pub periods_per_year: usize,
    /// Annual risk-free rate
    pub rf: f64,
    /// Confidence level of the parametric value-at-risk
    pub var_confidence: f64,
    /// Upper quantile of the tail ratio
    pub tail_cutoff: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            periods_per_year: 252,
            rf: 0.0,
            var_confidence: 0.95,
            tail_cutoff: 0.95,
        }
    }
}

impl MetricsConfig {
    fn annualization(&self) -> f64 {
        (self.periods_per_year as f64).sqrt()
    }

    fn excess(&self, returns: &[f64]) -> Vec<f64> {
        let rf = if self.rf == 0.0 {
            0.0
        } else {
            (1.0 + self.rf).powf(1.0 / self.periods_per_year as f64) - 1.0
        };
        returns
            .iter()
            .copied()
            .filter(|r| r.is_finite())
            .map(|r| r - rf)
            .collect()
    }
}

/// Display labels of the key metrics, in table order.
pub const METRIC_LABELS: [&str; 27] = [
    "CAGR",
    "Sharpe",
    "Sortino",
    "Max Drawdown",
    "Volatility (ann.)",
    "Calmar",
    "Expected Daily %",
    "Expected Monthly %",
    "Expected Yearly %",
    "Cumulative Return %",
    "Prob. Sharpe Ratio",
    "Smart Sharpe",
    "Smart Sortino",
    "Sortino/√2",
    "Smart Sortino/√2",
    "Skew",
    "Kurtosis",
    "Daily Value-at-Risk",
    "Expected Shortfall (cVaR)",
    "Gain/Pain Ratio",
    "Tail Ratio",
    "Best Day",
    "Worst Day",
    "Best Month",
    "Worst Month",
    "Recovery Factor",
    "Ulcer Index",
];

/// The key metrics of one return series.
///
/// Undefined values (too few observations, zero deviation) are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    /// Compound annual growth rate (fraction)
    pub cagr: f64,
    /// Annualized Sharpe ratio
    pub sharpe: f64,
    /// Annualized Sortino ratio
    pub sortino: f64,
    /// Deepest drawdown (negative fraction)
    pub max_drawdown: f64,
    /// Annualized volatility (fraction)
    pub volatility: f64,
    /// CAGR over absolute max drawdown
    pub calmar: f64,
    /// Geometric mean daily return (%)
    pub expected_daily_pct: f64,
    /// Geometric mean monthly return (%)
    pub expected_monthly_pct: f64,
    /// Geometric mean yearly return (%)
    pub expected_yearly_pct: f64,
    /// Total compounded return (%)
    pub cumulative_return_pct: f64,
    /// Probability that the true Sharpe ratio exceeds zero
    pub probabilistic_sharpe: f64,
    /// Sharpe ratio penalised for autocorrelation
    pub smart_sharpe: f64,
    /// Sortino ratio penalised for autocorrelation
    pub smart_sortino: f64,
    /// Sortino ratio divided by √2
    pub sortino_sqrt2: f64,
    /// Smart Sortino ratio divided by √2
    pub smart_sortino_sqrt2: f64,
    /// Bias-corrected sample skewness
    pub skew: f64,
    /// Bias-corrected sample excess kurtosis
    pub kurtosis: f64,
    /// Parametric daily value-at-risk (fraction)
    pub value_at_risk: f64,
    /// Mean return below the value-at-risk (fraction)
    pub expected_shortfall: f64,
    /// Sum of returns over absolute sum of losses
    pub gain_pain_ratio: f64,
    /// Upper over lower tail quantile
    pub tail_ratio: f64,
    /// Best daily return (fraction)
    pub best_day: f64,
    /// Worst daily return (fraction)
    pub worst_day: f64,
    /// Best monthly return (fraction)
    pub best_month: f64,
    /// Worst monthly return (fraction)
    pub worst_month: f64,
    /// Absolute total return over absolute max drawdown
    pub recovery_factor: f64,
    /// Root mean square drawdown
    pub ulcer_index: f64,
}

impl KeyMetrics {
    /// Calculate all key metrics of a daily return series.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use momentum_stats::{KeyMetrics, MetricsConfig};
    ///
    /// let metrics = KeyMetrics::calculate(&returns, &MetricsConfig::default());
    /// for (label, value) in metrics.rows() {
    ///     println!("{label}: {value:.2}");
    /// }
    /// ```
    pub fn calculate(returns: &TimeSeries, config: &MetricsConfig) -> Self {
        let clean = returns.dropna();
        let values = clean.values();
        let excess = config.excess(values);

        let monthly = resample(&clean, Frequency::Monthly);
        let yearly = resample(&clean, Frequency::Yearly);

        let drawdown = drawdown_series(&clean);
        let max_drawdown = drawdown.values().iter().copied().fold(0.0, f64::min);

        let cagr = cagr(&clean);
        let smart_sortino = sortino(&excess, config, true);
        let sortino = sortino(&excess, config, false);
        let value_at_risk = value_at_risk(values, config.var_confidence);

        Self {
            cagr,
            sharpe: sharpe(&excess, config, false),
            sortino,
            max_drawdown,
            volatility: sample_std(values) * config.annualization(),
            calmar: cagr / max_drawdown.abs(),
            expected_daily_pct: geometric_mean(values) * 100.0,
            expected_monthly_pct: geometric_mean(monthly.values()) * 100.0,
            expected_yearly_pct: geometric_mean(yearly.values()) * 100.0,
            cumulative_return_pct: compounded(values) * 100.0,
            probabilistic_sharpe: probabilistic_sharpe(&excess),
            smart_sharpe: sharpe(&excess, config, true),
            smart_sortino,
            sortino_sqrt2: sortino / std::f64::consts::SQRT_2,
            smart_sortino_sqrt2: smart_sortino / std::f64::consts::SQRT_2,
            skew: skew(values),
            kurtosis: kurtosis(values),
            value_at_risk,
            expected_shortfall: expected_shortfall(values, value_at_risk),
            gain_pain_ratio: gain_pain_ratio(values),
            tail_ratio: (quantile(values, config.tail_cutoff)
                / quantile(values, 1.0 - config.tail_cutoff))
            .abs(),
            best_day: max(values),
            worst_day: min(values),
            best_month: max(monthly.values()),
            worst_month: min(monthly.values()),
            recovery_factor: values.iter().sum::<f64>().abs() / max_drawdown.abs(),
            ulcer_index: ulcer_index(drawdown.values()),
        }
    }

    /// `(label, value)` pairs in table order.
    pub fn rows(&self) -> Vec<(&'static str, f64)> {
        let values = [
            self.cagr,
            self.sharpe,
            self.sortino,
            self.max_drawdown,
            self.volatility,
            self.calmar,
            self.expected_daily_pct,
            self.expected_monthly_pct,
            self.expected_yearly_pct,
            self.cumulative_return_pct,
            self.probabilistic_sharpe,
            self.smart_sharpe,
            self.smart_sortino,
            self.sortino_sqrt2,
            self.smart_sortino_sqrt2,
            self.skew,
            self.kurtosis,
            self.value_at_risk,
            self.expected_shortfall,
            self.gain_pain_ratio,
            self.tail_ratio,
            self.best_day,
            self.worst_day,
            self.best_month,
            self.worst_month,
            self.recovery_factor,
            self.ulcer_index,
        ];
        METRIC_LABELS.into_iter().zip(values).collect()
    }
}

/// Compound annual growth rate over the calendar span of the series.
fn cagr(returns: &TimeSeries) -> f64 {
    let Some(range) = returns.date_range() else {
        return f64::NAN;
    };
    let years = (range.end() - range.start()).num_days() as f64 / DAYS_PER_YEAR;
    if years <= 0.0 {
        return f64::NAN;
    }
    let total = compounded(returns.values());
    (total + 1.0).abs().powf(1.0 / years) - 1.0
}

/// `sqrt(1 + 2 * sum(((n - k) / n) * |rho|^k))` for lags `k = 1..n`.
fn autocorr_penalty(returns: &[f64]) -> f64 {
    let n = returns.len();
    if n < 3 {
        return f64::NAN;
    }
    let coef = correlation(&returns[..n - 1], &returns[1..]).abs();
    let nf = n as f64;
    let sum: f64 = (1..n)
        .map(|k| ((nf - k as f64) / nf) * coef.powi(k as i32))
        .sum();
    (1.0 + 2.0 * sum).sqrt()
}

fn sharpe_ratio(excess: &[f64]) -> f64 {
    mean(excess) / sample_std(excess)
}

fn sharpe(excess: &[f64], config: &MetricsConfig, smart: bool) -> f64 {
    let mut ratio = sharpe_ratio(excess);
    if smart {
        ratio /= autocorr_penalty(excess);
    }
    ratio * config.annualization()
}

fn sortino(excess: &[f64], config: &MetricsConfig, smart: bool) -> f64 {
    if excess.is_empty() {
        return f64::NAN;
    }
    let downside = (excess
        .iter()
        .filter(|r| **r < 0.0)
        .map(|r| r * r)
        .sum::<f64>()
        / excess.len() as f64)
        .sqrt();
    let mut divisor = downside;
    if smart {
        divisor *= autocorr_penalty(excess);
    }
    mean(excess) / divisor * config.annualization()
}

/// Probabilistic Sharpe ratio against a zero benchmark Sharpe.
///
/// Uses the non-annualized Sharpe and the excess kurtosis of the series.
fn probabilistic_sharpe(excess: &[f64]) -> f64 {
    let n = excess.len();
    if n < 2 {
        return f64::NAN;
    }
    let base = sharpe_ratio(excess);
    let skew = skew(excess);
    let kurt = kurtosis(excess);
    let variance =
        (1.0 + 0.5 * base.powi(2) - skew * base + (kurt - 3.0) / 4.0 * base.powi(2)) / (n - 1) as f64;
    let sigma = variance.sqrt();
    standard_normal_cdf(base / sigma)
}

fn standard_normal_cdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    Normal::new(0.0, 1.0).map_or(f64::NAN, |n| n.cdf(x))
}

/// Parametric value-at-risk: the `1 - confidence` quantile of a normal fitted
/// to the returns.
fn value_at_risk(returns: &[f64], confidence: f64) -> f64 {
    let confidence = if confidence > 1.0 {
        confidence / 100.0
    } else {
        confidence
    };
    match Normal::new(mean(returns), sample_std(returns)) {
        Ok(normal) => normal.inverse_cdf(1.0 - confidence),
        Err(_) => f64::NAN,
    }
}

/// Mean of the returns below `var`, or `var` itself when none are.
fn expected_shortfall(returns: &[f64], var: f64) -> f64 {
    let tail: Vec<f64> = returns.iter().copied().filter(|r| *r < var).collect();
    if tail.is_empty() {
        var
    } else {
        mean(&tail)
    }
}

fn gain_pain_ratio(returns: &[f64]) -> f64 {
    let pain = returns.iter().filter(|r| **r < 0.0).sum::<f64>().abs();
    returns.iter().sum::<f64>() / pain
}

/// `prod(1 + r)^(1 / n) - 1`.
fn geometric_mean(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return f64::NAN;
    }
    let growth: f64 = returns.iter().map(|r| 1.0 + r).product();
    growth.powf(1.0 / returns.len() as f64) - 1.0
}

fn ulcer_index(drawdown: &[f64]) -> f64 {
    if drawdown.len() < 2 {
        return f64::NAN;
    }
    (drawdown.iter().map(|d| d * d).sum::<f64>() / (drawdown.len() - 1) as f64).sqrt()
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Days;
    use momentum_traits::Date;

    fn daily(values: &[f64]) -> TimeSeries {
        let start = Date::from_ymd_opt(2023, 1, 2).unwrap();
        let dates = (0..values.len())
            .map(|i| start + Days::new(i as u64))
            .collect();
        TimeSeries::new(Some("TEST".to_string()), dates, values.to_vec()).unwrap()
    }

    fn alternating(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| match i % 4 {
                0 => 0.01,
                1 => -0.005,
                2 => 0.02,
                _ => -0.015,
            })
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = MetricsConfig::default();
        assert_eq!(config.periods_per_year, 252);
        assert_eq!(config.var_confidence, 0.95);
    }

    #[test]
    fn test_rows_follow_label_order() {
        let metrics = KeyMetrics::calculate(&daily(&alternating(200)), &MetricsConfig::default());
        let rows = metrics.rows();
        assert_eq!(rows.len(), 27);
        assert_eq!(rows[0].0, "CAGR");
        assert_eq!(rows[26].0, "Ulcer Index");
        assert_eq!(rows[3].1, metrics.max_drawdown);
    }

    #[test]
    fn test_basic_values() {
        let returns = daily(&[0.1, -0.2, 0.05, 0.1]);
        let m = KeyMetrics::calculate(&returns, &MetricsConfig::default());

        assert_relative_eq!(
            m.cumulative_return_pct,
            (1.1 * 0.8 * 1.05 * 1.1 - 1.0) * 100.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(m.max_drawdown, -0.2, epsilon = 1e-12);
        assert_relative_eq!(m.best_day, 0.1);
        assert_relative_eq!(m.worst_day, -0.2);
        assert_relative_eq!(m.gain_pain_ratio, 0.05 / 0.2, epsilon = 1e-12);
        assert_relative_eq!(m.recovery_factor, 0.05 / 0.2, epsilon = 1e-12);
        assert_relative_eq!(m.sortino_sqrt2, m.sortino / 2_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_sharpe_and_volatility() {
        let values = alternating(100);
        let m = KeyMetrics::calculate(&daily(&values), &MetricsConfig::default());
        let expected = mean(&values) / sample_std(&values) * 252_f64.sqrt();
        assert_relative_eq!(m.sharpe, expected, epsilon = 1e-12);
        assert_relative_eq!(
            m.volatility,
            sample_std(&values) * 252_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_cagr_uses_calendar_days() {
        // 366 calendar days apart
        let returns = TimeSeries::new(
            None,
            vec![
                Date::from_ymd_opt(2023, 1, 1).unwrap(),
                Date::from_ymd_opt(2024, 1, 2).unwrap(),
            ],
            vec![0.0, 0.1],
        )
        .unwrap();
        let years = 366.0 / 365.0;
        assert_relative_eq!(cagr(&returns), 1.1_f64.powf(1.0 / years) - 1.0, epsilon = 1e-12);
        assert!(cagr(&daily(&[0.1])).is_nan());
    }

    #[test]
    fn test_value_at_risk_and_shortfall() {
        let values = alternating(40);
        let var = value_at_risk(&values, 0.95);
        let normal = Normal::new(mean(&values), sample_std(&values)).unwrap();
        assert_relative_eq!(var, normal.inverse_cdf(0.05), epsilon = 1e-9);
        assert!(var < 0.0);

        let es = expected_shortfall(&values, var);
        assert!(es <= var);
        assert_relative_eq!(expected_shortfall(&[0.01, 0.02], -0.5), -0.5);
    }

    #[test]
    fn test_autocorr_penalty() {
        // perfectly alternating signs have |rho| = 1
        let values = vec![0.01, -0.01, 0.01, -0.01, 0.01, -0.01];
        let penalty = autocorr_penalty(&values);
        let n = values.len() as f64;
        let expected = (1.0 + 2.0 * (1..values.len()).map(|k| (n - k as f64) / n).sum::<f64>()).sqrt();
        assert_relative_eq!(penalty, expected, epsilon = 1e-9);

        let m = KeyMetrics::calculate(&daily(&alternating(120)), &MetricsConfig::default());
        assert!(m.smart_sharpe.abs() <= m.sharpe.abs());
    }

    #[test]
    fn test_probabilistic_sharpe_in_unit_interval() {
        let m = KeyMetrics::calculate(&daily(&alternating(250)), &MetricsConfig::default());
        assert!(m.probabilistic_sharpe > 0.0 && m.probabilistic_sharpe < 1.0);
    }

    #[test]
    fn test_tail_ratio_and_ulcer() {
        let m = KeyMetrics::calculate(&daily(&alternating(80)), &MetricsConfig::default());
        let values = alternating(80);
        let expected = (quantile(&values, 0.95) / quantile(&values, 0.05)).abs();
        assert_relative_eq!(m.tail_ratio, expected, epsilon = 1e-12);
        assert!(m.ulcer_index >= 0.0);
    }

    #[test]
    fn test_empty_series_is_nan() {
        let m = KeyMetrics::calculate(&TimeSeries::empty(None), &MetricsConfig::default());
        assert!(m.cagr.is_nan());
        assert!(m.sharpe.is_nan());
        assert!(m.best_day.is_nan());
        assert_eq!(m.max_drawdown, 0.0);
    }

    #[test]
    fn test_monthly_extremes() {
        let returns = TimeSeries::new(
            None,
            vec![
                Date::from_ymd_opt(2024, 1, 10).unwrap(),
                Date::from_ymd_opt(2024, 1, 11).unwrap(),
                Date::from_ymd_opt(2024, 2, 1).unwrap(),
            ],
            vec![0.1, 0.1, -0.3],
        )
        .unwrap();
        let m = KeyMetrics::calculate(&returns, &MetricsConfig::default());
        assert_relative_eq!(m.best_month, 0.21, epsilon = 1e-12);
        assert_relative_eq!(m.worst_month, -0.3, epsilon = 1e-12);
    }
}
