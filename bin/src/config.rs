//! Dashboard configuration read from the environment.

use std::env;

use chrono::{Duration, NaiveDate};

use crate::data::Provider;

/// Dashboard settings, read once at startup.
///
/// Every variable is optional; a `.env` file in the working directory is
/// loaded first.
#[derive(Debug, Clone)]
pub(crate) struct DashboardConfig {
    pub(crate) bind: String,
    pub(crate) port: u16,
    pub(crate) provider: Provider,
    /// Ticker shown when the request names none.
    pub(crate) default_symbol: String,
    pub(crate) default_benchmark: String,
    /// Default start date is this many years (of 365 days) before today.
    pub(crate) lookback_years: u32,
    /// Earliest selectable start date.
    pub(crate) earliest_date: NaiveDate,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn default_earliest() -> NaiveDate {
    NaiveDate::from_ymd_opt(1987, 1, 1).unwrap_or(NaiveDate::MIN)
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8501,
            provider: Provider::Yahoo,
            default_symbol: "MSFT".to_string(),
            default_benchmark: "SPY".to_string(),
            lookback_years: 5,
            earliest_date: default_earliest(),
        }
    }
}

impl DashboardConfig {
    /// Reads `MOMENTUM_*` variables, falling back to the defaults.
    pub(crate) fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        let earliest_date = env::var("MOMENTUM_EARLIEST_DATE")
            .ok()
            .and_then(|s| crate::data::parse_date(s.trim()).ok())
            .unwrap_or(defaults.earliest_date);

        Self {
            bind: env_str("MOMENTUM_BIND", &defaults.bind),
            port: env_parse("MOMENTUM_PORT", defaults.port),
            provider: env_parse("MOMENTUM_PROVIDER", defaults.provider),
            default_symbol: env_str("MOMENTUM_DEFAULT_SYMBOL", &defaults.default_symbol),
            default_benchmark: env_str("MOMENTUM_DEFAULT_BENCHMARK", &defaults.default_benchmark),
            lookback_years: env_parse("MOMENTUM_LOOKBACK_YEARS", defaults.lookback_years),
            earliest_date,
        }
    }

    /// Default start date for a request made on `today`.
    pub(crate) fn default_start(&self, today: NaiveDate) -> NaiveDate {
        let start = today - Duration::days(i64::from(self.lookback_years) * 365);
        start.max(self.earliest_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.port, 8501);
        assert_eq!(config.default_symbol, "MSFT");
        assert_eq!(config.default_benchmark, "SPY");
        assert_eq!(config.earliest_date, NaiveDate::from_ymd_opt(1987, 1, 1).unwrap());
    }

    #[test]
    fn test_default_start_is_five_years_of_days() {
        let config = DashboardConfig::default();
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        // 5 * 365 days, leap day included in the span
        assert_eq!(config.default_start(today), NaiveDate::from_ymd_opt(2019, 7, 2).unwrap());
    }

    #[test]
    fn test_default_start_not_before_earliest() {
        let config = DashboardConfig {
            lookback_years: 50,
            ..DashboardConfig::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert_eq!(config.default_start(today), config.earliest_date);
    }
}
