//! Error types for the MarketMomentum crates.
//!
//! This module defines the error type shared across the workspace, covering
//! series construction, data validation and provider failures.

use thiserror::Error;

/// The main error type for MarketMomentum operations.
#[derive(Debug, Error)]
pub enum MomentumError {
    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Dates and values of a series have different lengths.
    #[error("time series length mismatch: {dates} dates vs {values} values")]
    LengthMismatch {
        /// Number of dates supplied.
        dates: usize,
        /// Number of values supplied.
        values: usize,
    },

    /// Error when data is insufficient for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error when a symbol is not known to the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for MomentumError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for MomentumError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for MarketMomentum operations.
pub type Result<T> = std::result::Result<T, MomentumError>;
