//! Drawdown period extraction.
//!
//! A drawdown period is a maximal run of consecutive observations whose
//! drawdown is strictly negative. The finder is a run-length encoding over
//! the boolean series `drawdown < 0`: each run becomes one
//! [`DrawdownPeriod`] summarising its start, valley and end dates, its length
//! in calendar days and its depth.

use momentum_traits::{Date, TimeSeries, stats::quantile};
use serde::{Deserialize, Serialize};

use crate::transform::drawdown_series;

/// Number of worst periods listed in drawdown tables.
pub const TABLE_PERIODS: usize = 10;

/// Number of worst periods shaded on the earnings chart.
pub const SHADED_PERIODS: usize = 5;

/// One contiguous under-water period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownPeriod {
    /// First negative-drawdown day.
    pub start: Date,
    /// Day of the deepest drawdown (first occurrence).
    pub valley: Date,
    /// Last negative-drawdown day, or the last observation when the series
    /// ends under water.
    pub end: Date,
    /// Calendar days from start to end, both included.
    pub days: i64,
    /// Deepest drawdown of the period (a negative fraction).
    pub max_drawdown: f64,
    /// Deepest drawdown after discarding values at or below the period's 1%
    /// quantile.
    pub max_drawdown_99: f64,
}

impl DrawdownPeriod {
    fn from_run(dates: &[Date], values: &[f64]) -> Option<Self> {
        let (&start, &end) = (dates.first()?, dates.last()?);

        let mut valley_idx = 0;
        for (idx, value) in values.iter().enumerate() {
            if *value < values[valley_idx] {
                valley_idx = idx;
            }
        }
        let max_drawdown = values[valley_idx];

        let cutoff = quantile(values, 0.01);
        let max_drawdown_99 = values
            .iter()
            .copied()
            .filter(|v| *v > cutoff)
            .reduce(f64::min)
            .unwrap_or(max_drawdown);

        Some(Self {
            start,
            valley: dates[valley_idx],
            end,
            days: (end - start).num_days() + 1,
            max_drawdown,
            max_drawdown_99,
        })
    }

    /// Whether `date` lies inside the period.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Splits a drawdown series into its under-water periods, in chronological
/// order.
pub fn drawdown_periods(drawdown: &TimeSeries) -> Vec<DrawdownPeriod> {
    let dates = drawdown.dates();
    let values = drawdown.values();

    let mut periods = Vec::new();
    let mut run_start: Option<usize> = None;

    for (idx, value) in values.iter().enumerate() {
        match (run_start, *value < 0.0) {
            (None, true) => run_start = Some(idx),
            (Some(start), false) => {
                periods.extend(DrawdownPeriod::from_run(
                    &dates[start..idx],
                    &values[start..idx],
                ));
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        periods.extend(DrawdownPeriod::from_run(&dates[start..], &values[start..]));
    }

    periods
}

/// The `n` deepest drawdown periods of a return series, deepest first.
///
/// Periods with equal depth keep their chronological order.
pub fn worst_drawdown_periods(returns: &TimeSeries, n: usize) -> Vec<DrawdownPeriod> {
    let mut periods = drawdown_periods(&drawdown_series(returns));
    periods.sort_by(|a, b| a.max_drawdown.total_cmp(&b.max_drawdown));
    periods.truncate(n);
    periods
}
