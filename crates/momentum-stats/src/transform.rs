//! Price and drawdown transforms of a return series.

use momentum_traits::TimeSeries;

/// Running product of `(1 + r)`.
///
/// Non-finite returns contribute a factor of one, so the curve stays flat
/// across missing observations.
///
/// # Example
///
/// ```
/// use momentum_stats::transform::cumulative_growth;
///
/// let growth = cumulative_growth(&[0.1, -0.1]);
/// assert!((growth[1] - 0.99).abs() < 1e-12);
/// ```
pub fn cumulative_growth(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0_f64, |acc, r| {
            if r.is_finite() {
                *acc *= 1.0 + r;
            }
            Some(*acc)
        })
        .collect()
}

/// Total compounded return `prod(1 + r) - 1` over the finite values.
pub fn compounded(returns: &[f64]) -> f64 {
    returns
        .iter()
        .filter(|r| r.is_finite())
        .fold(1.0, |acc, r| acc * (1.0 + r))
        - 1.0
}

/// Growth of one unit invested at the start of the series.
pub fn prices(returns: &TimeSeries) -> TimeSeries {
    let growth = cumulative_growth(returns.values());
    TimeSeries::from_sorted(
        returns.name().map(str::to_string),
        returns.dates().to_vec(),
        growth,
    )
}

/// Drawdown values for a price curve: `price / running_max(price) - 1`.
///
/// The running maximum is seeded with the first price. Non-finite results
/// and negative zero become `0`.
pub fn drawdown_values(prices: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    prices
        .iter()
        .map(|&p| {
            if p > peak {
                peak = p;
            }
            let dd = p / peak - 1.0;
            if dd.is_finite() && dd < 0.0 { dd } else { 0.0 }
        })
        .collect()
}

/// Drawdown series of a return series.
///
/// Every value is `<= 0` and equals `0` exactly where the cumulative price
/// sits at its running maximum.
pub fn drawdown_series(returns: &TimeSeries) -> TimeSeries {
    let growth = cumulative_growth(returns.values());
    TimeSeries::from_sorted(
        returns.name().map(str::to_string),
        returns.dates().to_vec(),
        drawdown_values(&growth),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use momentum_traits::Date;

    fn series(values: &[f64]) -> TimeSeries {
        let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..values.len())
            .map(|i| start + chrono::Days::new(i as u64))
            .collect();
        TimeSeries::new(Some("TEST".to_string()), dates, values.to_vec()).unwrap()
    }

    #[test]
    fn test_cumulative_growth_is_running_product() {
        let returns = [0.01, -0.02, 0.03, f64::NAN, 0.005];
        let growth = cumulative_growth(&returns);

        let mut expected = 1.0;
        for (r, g) in returns.iter().zip(&growth) {
            if r.is_finite() {
                expected *= 1.0 + r;
            }
            assert_relative_eq!(*g, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_compounded() {
        assert_relative_eq!(compounded(&[0.1, 0.1]), 0.21, epsilon = 1e-12);
        assert_relative_eq!(compounded(&[]), 0.0);
        assert_relative_eq!(compounded(&[0.5, f64::NAN]), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_drawdown_non_positive_and_zero_at_peak() {
        let returns = series(&[0.05, -0.10, 0.02, 0.20, -0.01, -0.03, 0.0]);
        let growth = cumulative_growth(returns.values());
        let dd = drawdown_series(&returns);

        let mut peak = f64::NEG_INFINITY;
        for (price, value) in growth.iter().zip(dd.values()) {
            peak = peak.max(*price);
            assert!(*value <= 0.0);
            assert_eq!(*value == 0.0, *price >= peak);
        }
    }

    #[test]
    fn test_drawdown_first_day_loss_is_not_a_drawdown() {
        // running max is seeded with the first price, not with 1.0
        let dd = drawdown_values(&[0.9, 0.81, 0.95]);
        assert_eq!(dd[0], 0.0);
        assert_relative_eq!(dd[1], -0.1, epsilon = 1e-12);
        assert_eq!(dd[2], 0.0);
    }

    #[test]
    fn test_drawdown_has_no_negative_zero() {
        let dd = drawdown_values(&[1.0, 1.0, 1.0]);
        assert!(dd.iter().all(|v| v.to_bits() == 0.0_f64.to_bits()));
    }

    #[test]
    fn test_prices_keeps_dates_and_name() {
        let returns = series(&[0.1, 0.1]);
        let p = prices(&returns);
        assert_eq!(p.dates(), returns.dates());
        assert_eq!(p.name(), Some("TEST"));
        assert_relative_eq!(p.values()[1], 1.21, epsilon = 1e-12);
    }
}
