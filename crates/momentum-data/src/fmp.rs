//! Financial Modeling Prep client.

use crate::{Result, error::DataError, types::HistoricalPrice};
use async_trait::async_trait;
use momentum_traits::{ReturnsSource, TimeSeries};
use reqwest::{Client, Url};
use std::env;
use tracing::{debug, warn};

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

const PROVIDER: &str = "FMP";

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| DataError::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(DataError::MissingApiKey);
        }

        Ok(Self::new(api_key))
    }

    /// Build an endpoint URL with encoded query parameters and the API key.
    fn url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url> {
        let base = format!("{FMP_BASE_URL}/{endpoint}");
        let mut url = Url::parse(&base).map_err(|e| DataError::InvalidUrl(format!("{base}: {e}")))?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("apikey", &self.api_key);
        Ok(url)
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = self.url(endpoint, params)?;
        let response = self.client.get(url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimitExceeded(PROVIDER));
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DataError::Api {
                provider: PROVIDER,
                message: format!("HTTP {status}: {text}"),
            });
        }

        let text = response.text().await?;

        // Check for error responses
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(DataError::Api {
                provider: PROVIDER,
                message: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get historical daily prices for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `from` - Start date (YYYY-MM-DD)
    /// * `to` - End date (YYYY-MM-DD)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<HistoricalPrice>> {
        let ticker = symbol.to_uppercase();
        let mut params = vec![("symbol", ticker.as_str())];
        if let Some(f) = from {
            params.push(("from", f));
        }
        if let Some(t) = to {
            params.push(("to", t));
        }

        // The stable API returns a flat array, not a wrapped response
        self.get("historical-price-eod/full", &params).await
    }

    /// Download the full daily return history for a symbol.
    ///
    /// Unknown symbols produce an empty series.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn returns(&self, symbol: &str) -> Result<TimeSeries> {
        let bars = self.historical_prices(symbol, None, None).await?;
        Ok(returns_from_bars(symbol, &bars)?)
    }
}

/// Converts FMP bars (newest first) into a daily return series.
pub(crate) fn returns_from_bars(
    symbol: &str,
    bars: &[HistoricalPrice],
) -> momentum_traits::Result<TimeSeries> {
    let mut dates = Vec::with_capacity(bars.len());
    let mut prices = Vec::with_capacity(bars.len());
    for bar in bars {
        match bar.parsed_date() {
            Some(date) => {
                dates.push(date);
                prices.push(bar.return_price());
            }
            None => warn!(symbol, date = %bar.date, "skipping bar with unparseable date"),
        }
    }
    TimeSeries::from_prices(Some(symbol.to_string()), dates, prices)
}

#[async_trait]
impl ReturnsSource for FmpClient {
    fn name(&self) -> &str {
        "fmp"
    }

    async fn download_returns(&self, symbol: &str) -> momentum_traits::Result<TimeSeries> {
        let series = self.returns(symbol).await?;
        debug!(symbol, observations = series.len(), "downloaded returns from FMP");
        Ok(series)
    }
}
