//! Calendar resampling of daily series.

use chrono::{Datelike, Months};
use momentum_traits::{Date, TimeSeries};
use serde::{Deserialize, Serialize};

use crate::transform::compounded;

/// Aggregation frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// Calendar months, labelled by the last day of the month.
    Monthly,
    /// Calendar years, labelled by 31 December.
    Yearly,
}

impl Frequency {
    /// Last calendar day of the period containing `date`.
    ///
    /// ```
    /// use momentum_stats::resample::Frequency;
    /// use momentum_traits::Date;
    ///
    /// let d = Date::from_ymd_opt(2024, 2, 10).unwrap();
    /// assert_eq!(Frequency::Monthly.period_end(d), Date::from_ymd_opt(2024, 2, 29).unwrap());
    /// assert_eq!(Frequency::Yearly.period_end(d), Date::from_ymd_opt(2024, 12, 31).unwrap());
    /// ```
    pub fn period_end(self, date: Date) -> Date {
        let end = match self {
            Self::Monthly => Date::from_ymd_opt(date.year(), date.month(), 1)
                .and_then(|first| first.checked_add_months(Months::new(1)))
                .and_then(|next| next.pred_opt()),
            Self::Yearly => Date::from_ymd_opt(date.year(), 12, 31),
        };
        end.unwrap_or(date)
    }
}

/// Groups consecutive observations by period end and reduces each group.
fn group_by_period(
    series: &TimeSeries,
    freq: Frequency,
    reduce: impl Fn(&[f64]) -> f64,
) -> TimeSeries {
    let mut dates = Vec::new();
    let mut values = Vec::new();

    let src_dates = series.dates();
    let src_values = series.values();
    let mut start = 0;

    while start < src_dates.len() {
        let label = freq.period_end(src_dates[start]);
        let len = src_dates[start..]
            .iter()
            .take_while(|d| freq.period_end(**d) == label)
            .count();
        dates.push(label);
        values.push(reduce(&src_values[start..start + len]));
        start += len;
    }

    TimeSeries::from_sorted(series.name().map(str::to_string), dates, values)
}

/// Compounds returns per period: `prod(1 + r) - 1`.
///
/// Only periods that contain at least one observation are emitted.
pub fn resample(returns: &TimeSeries, freq: Frequency) -> TimeSeries {
    group_by_period(returns, freq, compounded)
}

/// Last observation of each period, e.g. month-end cumulative values.
pub fn resample_last(series: &TimeSeries, freq: Frequency) -> TimeSeries {
    group_by_period(series, freq, |values| {
        values.last().copied().unwrap_or(f64::NAN)
    })
}
