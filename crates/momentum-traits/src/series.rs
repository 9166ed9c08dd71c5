//! Dated series container.
//!
//! [`TimeSeries`] is the single data entity of the dashboard: a daily return
//! series keyed by date. Every derived view (cumulative price, drawdown,
//! resampled or rolling values) reuses the same container so that charts and
//! tables can treat them uniformly.

use serde::{Deserialize, Serialize};

use crate::{
    error::{MomentumError, Result},
    types::{Date, DateRange},
};

/// A named series of `(date, value)` observations sorted by date.
///
/// # Invariants
///
/// - `dates` and `values` have the same length.
/// - `dates` are strictly increasing.
///
/// An empty series is valid: providers return one for unknown tickers and
/// slicing may produce one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    name: Option<String>,
    dates: Vec<Date>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Builds a series from parallel date and value vectors.
    ///
    /// Observations are sorted by date; when a date appears more than once
    /// the last value wins.
    ///
    /// # Errors
    ///
    /// Returns [`MomentumError::LengthMismatch`] if the vectors differ in
    /// length.
    pub fn new(name: Option<String>, dates: Vec<Date>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(MomentumError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }

        let mut paired: Vec<(Date, f64)> = dates.into_iter().zip(values).collect();
        // stable sort keeps input order among equal dates
        paired.sort_by_key(|(d, _)| *d);

        let mut deduped: Vec<(Date, f64)> = Vec::with_capacity(paired.len());
        for (date, value) in paired {
            match deduped.last_mut() {
                Some(last) if last.0 == date => last.1 = value,
                _ => deduped.push((date, value)),
            }
        }

        let (dates, values) = deduped.into_iter().unzip();
        Ok(Self {
            name,
            dates,
            values,
        })
    }

    /// Builds an empty series carrying only a name.
    pub const fn empty(name: Option<String>) -> Self {
        Self {
            name,
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Converts a price history into daily simple returns.
    ///
    /// The return on day `t` is `p[t] / p[t-1] - 1`, so the first observation
    /// produces no return. Non-finite or non-positive prices are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`MomentumError::LengthMismatch`] if the vectors differ in
    /// length.
    pub fn from_prices(name: Option<String>, dates: Vec<Date>, prices: Vec<f64>) -> Result<Self> {
        let prices = Self::new(name, dates, prices)?;

        let mut dates = Vec::with_capacity(prices.len());
        let mut values = Vec::with_capacity(prices.len());
        let mut previous: Option<f64> = None;

        for (date, price) in prices.iter() {
            if !price.is_finite() || price <= 0.0 {
                continue;
            }
            if let Some(prev) = previous {
                dates.push(date);
                values.push(price / prev - 1.0);
            }
            previous = Some(price);
        }

        Ok(Self {
            name: prices.name,
            dates,
            values,
        })
    }

    /// Builds a series whose dates are already strictly increasing.
    ///
    /// Used by transforms that derive one series from another and therefore
    /// preserve the ordering invariant. The invariant is only checked in
    /// debug builds.
    pub fn from_sorted(name: Option<String>, dates: Vec<Date>, values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        debug_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        Self {
            name,
            dates,
            values,
        }
    }

    /// Derives a new series on the same dates by mapping every value.
    pub fn map_values(&self, f: impl FnMut(f64) -> f64) -> Self {
        Self::from_sorted(
            self.name.clone(),
            self.dates.clone(),
            self.values.iter().copied().map(f).collect(),
        )
    }

    /// Replaces the values of this series, keeping its dates and name.
    ///
    /// # Errors
    ///
    /// Returns [`MomentumError::LengthMismatch`] if `values` does not have
    /// one entry per date.
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.dates.len() {
            return Err(MomentumError::LengthMismatch {
                dates: self.dates.len(),
                values: values.len(),
            });
        }
        Ok(Self::from_sorted(self.name.clone(), self.dates.clone(), values))
    }

    /// Returns the series renamed.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Series name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Series name or `fallback` when unnamed.
    pub fn label<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }

    /// Observation dates in ascending order.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Observation values, aligned with [`dates`](Self::dates).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterates over `(date, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// First observation date.
    pub fn first_date(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// Last observation date.
    pub fn last_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// First and last observation dates.
    pub fn date_range(&self) -> Option<DateRange> {
        match (self.first_date(), self.last_date()) {
            (Some(start), Some(end)) => DateRange::new(start, end).ok(),
            _ => None,
        }
    }

    /// Value observed on `date`, if any.
    pub fn value_on(&self, date: Date) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|idx| self.values[idx])
    }

    /// Inclusive slice between two dates.
    ///
    /// Bounds need not be observation dates. An inverted range yields an
    /// empty series.
    pub fn between(&self, start: Date, end: Date) -> Self {
        if end < start {
            return Self::empty(self.name.clone());
        }
        let lo = self.dates.partition_point(|d| *d < start);
        let hi = self.dates.partition_point(|d| *d <= end);
        Self::from_sorted(
            self.name.clone(),
            self.dates[lo..hi].to_vec(),
            self.values[lo..hi].to_vec(),
        )
    }

    /// Slice to a [`DateRange`].
    pub fn within(&self, range: DateRange) -> Self {
        self.between(range.start(), range.end())
    }

    /// Keeps only observations with finite values.
    pub fn dropna(&self) -> Self {
        let (dates, values) = self.iter().filter(|(_, v)| v.is_finite()).unzip();
        Self::from_sorted(self.name.clone(), dates, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_new_sorts_and_dedups() {
        let series = TimeSeries::new(
            Some("MSFT".to_string()),
            vec![d(2024, 1, 3), d(2024, 1, 1), d(2024, 1, 3), d(2024, 1, 2)],
            vec![0.3, 0.1, 0.33, 0.2],
        )
        .unwrap();

        assert_eq!(series.dates(), &[d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);
        assert_eq!(series.values(), &[0.1, 0.2, 0.33]);
        assert_eq!(series.name(), Some("MSFT"));
    }

    #[test]
    fn test_new_length_mismatch() {
        let result = TimeSeries::new(None, vec![d(2024, 1, 1)], vec![]);
        assert!(matches!(
            result,
            Err(MomentumError::LengthMismatch {
                dates: 1,
                values: 0
            })
        ));
    }

    #[test]
    fn test_empty_series_is_valid() {
        let series = TimeSeries::new(None, vec![], vec![]).unwrap();
        assert!(series.is_empty());
        assert!(series.date_range().is_none());
    }

    #[test]
    fn test_from_prices() {
        let series = TimeSeries::from_prices(
            None,
            vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4)],
            vec![100.0, 110.0, f64::NAN, 99.0],
        )
        .unwrap();

        assert_eq!(series.dates(), &[d(2024, 1, 2), d(2024, 1, 4)]);
        assert_relative_eq!(series.values()[0], 0.10, epsilon = 1e-12);
        assert_relative_eq!(series.values()[1], -0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_between_inclusive() {
        let series = TimeSeries::new(
            None,
            vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 5), d(2024, 1, 8)],
            vec![1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();

        let sliced = series.between(d(2024, 1, 2), d(2024, 1, 5));
        assert_eq!(sliced.values(), &[2.0, 3.0]);

        let sliced = series.between(d(2024, 1, 3), d(2024, 1, 7));
        assert_eq!(sliced.values(), &[3.0]);

        let sliced = series.between(d(2024, 2, 1), d(2024, 3, 1));
        assert!(sliced.is_empty());

        let inverted = series.between(d(2024, 1, 8), d(2024, 1, 1));
        assert!(inverted.is_empty());
    }

    #[test]
    fn test_value_on_and_dropna() {
        let series = TimeSeries::new(
            None,
            vec![d(2024, 1, 1), d(2024, 1, 2)],
            vec![f64::NAN, 0.5],
        )
        .unwrap();

        assert_eq!(series.value_on(d(2024, 1, 2)), Some(0.5));
        assert_eq!(series.value_on(d(2024, 1, 3)), None);
        assert_eq!(series.dropna().len(), 1);
    }

    #[test]
    fn test_with_values_checks_length() {
        let series = TimeSeries::new(None, vec![d(2024, 1, 1)], vec![0.1]).unwrap();
        assert!(series.with_values(vec![0.2, 0.3]).is_err());
        assert_eq!(series.with_values(vec![0.2]).unwrap().values(), &[0.2]);
    }
}
