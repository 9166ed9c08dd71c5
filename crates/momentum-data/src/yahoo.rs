//! Yahoo Finance chart client.
//!
//! Uses the public `v8/finance/chart` endpoint, which needs no API key and
//! returns the full daily history of a ticker in one response.

use crate::{
    Result,
    error::DataError,
    types::{ChartResponse, ChartResult},
};
use async_trait::async_trait;
use momentum_traits::{ReturnsSource, TimeSeries};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, trace, warn};

/// Base URL for the Yahoo Finance chart API.
const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo rejects requests without a browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";

const PROVIDER: &str = "Yahoo";

/// Yahoo Finance API client.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    /// Create a new Yahoo client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client))
    }

    /// Create a Yahoo client on top of an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: YAHOO_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different chart endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the chart URL for the maximum daily history of `symbol`.
    ///
    /// The ticker is pushed as a single percent-encoded path segment, so
    /// reserved characters cannot alter the path or the query.
    fn url(&self, symbol: &str) -> Result<Url> {
        let invalid = |reason: &str| DataError::InvalidUrl(format!("{}: {reason}", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base"))?
            .pop_if_empty()
            .push(&symbol.to_uppercase());
        url.query_pairs_mut()
            .append_pair("interval", "1d")
            .append_pair("range", "max")
            .append_pair("includeAdjustedClose", "true")
            .append_pair("events", "div|split");
        Ok(url)
    }

    /// Fetch the raw chart for `symbol`.
    ///
    /// Returns `None` when Yahoo does not know the ticker.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn chart(&self, symbol: &str) -> Result<Option<ChartResult>> {
        let url = self.url(symbol)?;
        trace!(symbol, %url, "fetching Yahoo chart");
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(symbol, "Yahoo does not know symbol");
                return Ok(None);
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(DataError::RateLimitExceeded(PROVIDER)),
            status if !status.is_success() => {
                let text = response.text().await.unwrap_or_default();
                return Err(DataError::Api {
                    provider: PROVIDER,
                    message: format!("HTTP {status}: {text}"),
                });
            }
            _ => {}
        }

        let bytes = response.bytes().await?;
        let decoded: ChartResponse = serde_json::from_slice(&bytes)?;
        Ok(first_result(symbol, decoded))
    }

    /// Download the full daily return history for a symbol.
    ///
    /// Unknown symbols produce an empty series.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn returns(&self, symbol: &str) -> Result<TimeSeries> {
        let name = Some(symbol.to_string());
        let Some(result) = self.chart(symbol).await? else {
            return Ok(TimeSeries::empty(name));
        };
        let (dates, prices) = result.observations();
        Ok(TimeSeries::from_prices(name, dates, prices)?)
    }
}

fn first_result(symbol: &str, response: ChartResponse) -> Option<ChartResult> {
    if let Some(error) = &response.chart.error {
        warn!(symbol, code = %error.code, description = %error.description, "Yahoo chart error");
    }
    match response.chart.result {
        Some(results) => results.into_iter().next(),
        None => {
            warn!(symbol, "Yahoo response contained no chart.result object");
            None
        }
    }
}

#[async_trait]
impl ReturnsSource for YahooClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn download_returns(&self, symbol: &str) -> momentum_traits::Result<TimeSeries> {
        let series = self.returns(symbol).await?;
        debug!(symbol, observations = series.len(), "downloaded returns from Yahoo");
        Ok(series)
    }
}
