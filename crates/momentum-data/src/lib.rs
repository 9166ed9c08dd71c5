//! Market-data clients for MarketMomentum.
//!
//! This crate implements [`momentum_traits::ReturnsSource`] for the data
//! providers the dashboard can use:
//!
//! - [`YahooClient`]: the Yahoo Finance chart API (default, no key needed)
//! - [`FmpClient`]: the [Financial Modeling Prep](https://financialmodelingprep.com/) API
//! - [`InMemorySource`]: fixed series for tests and offline runs
//!
//! Every provider returns daily simple returns computed from adjusted closes,
//! and an empty series for tickers it does not know.
//!
//! # Usage
//!
//! ```rust,ignore
//! use momentum_data::YahooClient;
//! use momentum_traits::ReturnsSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = YahooClient::new()?;
//!     let returns = client.download_returns("MSFT").await?;
//!     println!("{} daily returns", returns.len());
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! The FMP client reads `FMP_API_KEY` from your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod error;
mod fmp;
mod memory;
mod types;
mod yahoo;

pub use error::DataError;
pub use fmp::FmpClient;
pub use memory::InMemorySource;
pub use types::*;
pub use yahoo::YahooClient;

/// Result type for market-data operations.
pub type Result<T> = std::result::Result<T, DataError>;
