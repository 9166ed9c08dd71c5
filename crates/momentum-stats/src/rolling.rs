//! Rolling risk ratios.
//!
//! Each statistic is evaluated over every full window of daily returns and
//! dated at the window's last observation. Incomplete leading windows and
//! non-finite results are dropped.

use momentum_traits::TimeSeries;
use ndarray::{ArrayView1, aview1};
use serde::{Deserialize, Serialize};

/// Configuration for rolling statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingConfig {
    /// Window length in observations (six months of trading days)
    pub window: usize,
    /// Number of periods per year for annualization
    pub periods_per_year: usize,
    /// Annual risk-free rate
    pub rf: f64,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            window: 126,
            periods_per_year: 252,
            rf: 0.0,
        }
    }
}

impl RollingConfig {
    fn annualization(&self) -> f64 {
        (self.periods_per_year as f64).sqrt()
    }

    /// Per-period risk-free rate derived from the annual one.
    pub fn rf_per_period(&self) -> f64 {
        if self.rf == 0.0 {
            0.0
        } else {
            (1.0 + self.rf).powf(1.0 / self.periods_per_year as f64) - 1.0
        }
    }
}

fn rolling(
    returns: &TimeSeries,
    config: &RollingConfig,
    stat: impl Fn(ArrayView1<'_, f64>) -> f64,
) -> TimeSeries {
    let window = config.window.max(1);
    let rf = config.rf_per_period();
    let excess: Vec<f64> = returns.values().iter().map(|r| r - rf).collect();

    let mut dates = Vec::new();
    let mut values = Vec::new();
    if excess.len() >= window {
        for (offset, view) in aview1(&excess).windows(window).into_iter().enumerate() {
            let value = stat(view);
            if value.is_finite() {
                dates.push(returns.dates()[offset + window - 1]);
                values.push(value);
            }
        }
    }

    TimeSeries::from_sorted(returns.name().map(str::to_string), dates, values)
}

/// Rolling annualized Sharpe ratio: `mean / std * sqrt(periods_per_year)`.
pub fn rolling_sharpe(returns: &TimeSeries, config: &RollingConfig) -> TimeSeries {
    let ann = config.annualization();
    rolling(returns, config, |w| {
        let mean = w.mean().unwrap_or(f64::NAN);
        mean / w.std(1.0) * ann
    })
}

/// Rolling annualized Sortino ratio.
///
/// Downside deviation is `sqrt(sum(r^2 for r < 0) / window)`.
pub fn rolling_sortino(returns: &TimeSeries, config: &RollingConfig) -> TimeSeries {
    let ann = config.annualization();
    rolling(returns, config, |w| {
        let mean = w.mean().unwrap_or(f64::NAN);
        let downside = w.iter().filter(|r| **r < 0.0).map(|r| r * r).sum::<f64>() / w.len() as f64;
        mean / downside.sqrt() * ann
    })
}

/// Rolling annualized volatility: `std * sqrt(periods_per_year)`.
pub fn rolling_volatility(returns: &TimeSeries, config: &RollingConfig) -> TimeSeries {
    let ann = config.annualization();
    rolling(returns, config, |w| w.std(1.0) * ann)
}
