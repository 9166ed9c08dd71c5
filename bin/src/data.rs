//! Data loading utilities for the MarketMomentum CLI.

use std::{fmt, str::FromStr, sync::Arc};

use chrono::NaiveDate;
use clap::ValueEnum;
use momentum_data::{FmpClient, YahooClient};
use momentum_traits::{MomentumError, ReturnsSource};

/// Market-data provider behind the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Provider {
    /// Yahoo Finance chart API, no key needed
    Yahoo,
    /// Financial Modeling Prep, needs `FMP_API_KEY`
    Fmp,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yahoo => write!(f, "yahoo"),
            Self::Fmp => write!(f, "fmp"),
        }
    }
}

impl FromStr for Provider {
    type Err = MomentumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "fmp" => Ok(Self::Fmp),
            other => Err(MomentumError::InvalidData(format!("Unknown provider: {other}"))),
        }
    }
}

/// Create the returns source for `provider`.
pub(crate) fn returns_source(provider: Provider) -> Result<Arc<dyn ReturnsSource>, MomentumError> {
    let source: Arc<dyn ReturnsSource> = match provider {
        Provider::Yahoo => Arc::new(YahooClient::new()?),
        Provider::Fmp => Arc::new(FmpClient::from_env()?),
    };
    tracing::debug!(provider = source.name(), "Created returns source");
    Ok(source)
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate, MomentumError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| MomentumError::InvalidDate(format!("Invalid date format: {e}")))
}
