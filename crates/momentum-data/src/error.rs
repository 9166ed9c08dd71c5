//! Error types for the market-data clients.

use momentum_traits::MomentumError;
use thiserror::Error;

/// Errors that can occur when downloading market data.
#[derive(Debug, Error)]
pub enum DataError {
    /// Missing API key.
    #[error("FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("{provider} API error: {message}")]
    Api {
        /// Provider that produced the error.
        provider: &'static str,
        /// Error text returned by the provider.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded for {0}")]
    RateLimitExceeded(&'static str),

    /// Series construction failed.
    #[error(transparent)]
    Series(#[from] MomentumError),

    /// Environment variable error.
    #[error("Environment error: {0}")]
    Env(#[from] dotenvy::Error),
}

impl From<DataError> for MomentumError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Series(inner) => inner,
            other => Self::DataFetch(other.to_string()),
        }
    }
}
