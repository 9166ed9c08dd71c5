//! Returns provider trait.
//!
//! This module defines the `ReturnsSource` trait, the seam between the
//! dashboard and whatever market-data service supplies daily returns. The
//! dashboard only ever asks a provider for the complete daily return history
//! of one ticker; slicing to the requested window happens downstream.

use async_trait::async_trait;

use crate::{Result, TimeSeries};

/// A provider of daily simple-return histories.
///
/// Implementations must be thread-safe (`Send + Sync`) because the dashboard
/// shares one provider between concurrent requests.
///
/// # Unknown tickers
///
/// A ticker the provider does not know is not an error: implementations
/// return an empty [`TimeSeries`] so callers can report "no data" to the
/// user. Errors are reserved for transport and decoding failures.
///
/// # Example
///
/// ```no_run
/// use async_trait::async_trait;
/// use momentum_traits::{Result, ReturnsSource, TimeSeries};
///
/// #[derive(Debug)]
/// struct Flat;
///
/// #[async_trait]
/// impl ReturnsSource for Flat {
///     fn name(&self) -> &str {
///         "flat"
///     }
///
///     async fn download_returns(&self, symbol: &str) -> Result<TimeSeries> {
///         Ok(TimeSeries::empty(Some(symbol.to_string())))
///     }
/// }
/// ```
#[async_trait]
pub trait ReturnsSource: Send + Sync + std::fmt::Debug {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Downloads the full daily return history of `symbol`.
    ///
    /// The returned series is named after the symbol, sorted by date and
    /// excludes the first price observation (which has no prior close).
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be reached or its response
    /// cannot be decoded.
    async fn download_returns(&self, symbol: &str) -> Result<TimeSeries>;
}
