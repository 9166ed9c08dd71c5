#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/marketmomentum/momentum/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # momentum
//!
//! Performance analytics for a single stock, optionally against a benchmark.
//!
//! ## Quick Start
//!
//! ```ignore
//! use momentum::{ReturnsSource, data::YahooClient, report::{CustomReport, ReportInput, ReportItem}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let yahoo = YahooClient::new()?;
//! let returns = yahoo.download_returns("MSFT").await?;
//!
//! let input = ReportInput::new("MSFT", returns)?;
//! let report = CustomReport::build(&input, &[ReportItem::MetricsTable, ReportItem::DrawdownGraph]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types ([`TimeSeries`], [`ReturnsSource`], [`MomentumError`])
//! - [`data`] - Market-data clients
//! - [`stats`] - Return-series analytics
//! - [`report`] - Tables, charts and exports
//!
//! ## Data Flow
//!
//! 1. A **source** downloads daily returns for a ticker
//! 2. The series is **sliced** to the selected date range
//! 3. **Stats** transforms derive prices, drawdowns, aggregates and ratios
//! 4. **Report** builders format them as tables and charts

/// Version information for the momentum crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core type definitions.
///
/// - [`TimeSeries`] - Dated `f64` observations
/// - [`ReturnsSource`] - Anything that can download daily returns
pub mod traits {
    pub use momentum_traits::*;
}

pub use momentum_traits::{
    Date, DateRange, MomentumError, Result, ReturnsSource, Symbol, TimeSeries, normalize_symbol,
};

// ============================================================================
// Data Providers
// ============================================================================

/// Market-data clients.
///
/// - **YahooClient**: daily adjusted closes from the Yahoo Finance chart API,
///   no key needed
/// - **FmpClient**: daily bars from Financial Modeling Prep, needs
///   `FMP_API_KEY`
/// - **InMemorySource**: preloaded series for tests and offline use
///
/// An unknown ticker yields an empty series rather than an error.
pub mod data {
    pub use momentum_data::*;
}

// ============================================================================
// Statistics
// ============================================================================

/// Return-series analytics.
///
/// ## Drawdowns
///
/// ```text
/// drawdown_t = price_t / max(price_0..=t) - 1
/// ```
///
/// A drawdown period is a maximal run of negative drawdown days.
///
/// ## Rolling Ratios
///
/// Sharpe, Sortino and volatility over 126-day windows, annualised with
/// `sqrt(252)`.
pub mod stats {
    pub use momentum_stats::*;
}

pub use momentum_stats::{DrawdownPeriod, KeyMetrics, MetricsConfig, RollingConfig};

// ============================================================================
// Reports
// ============================================================================

/// Report items, tables, charts, exports and the snapshot tearsheet.
pub mod report {
    pub use momentum_report::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_through_reexports() {
        let d = |m, day| chrono::NaiveDate::from_ymd_opt(2024, m, day).unwrap();
        let series = TimeSeries::new(
            None,
            vec![d(1, 2), d(1, 3), d(1, 4)],
            vec![0.01, -0.02, 0.03],
        )
        .unwrap();
        let source = data::InMemorySource::new().with_returns("MSFT", series);

        let returns = source.download_returns("msft").await.unwrap();
        let input = report::ReportInput::new("MSFT", returns).unwrap();
        let report = report::CustomReport::build(&input, &[report::ReportItem::MetricsTable]);
        assert_eq!(report.tables().len(), 1);
    }
}
