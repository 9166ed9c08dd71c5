//! Fetch, slice and validate the returns behind a page or a command.
//!
//! Every render runs the same sequence: the stock returns (served from a
//! single-slot cache while the symbol is unchanged), then the benchmark
//! (downloaded every time), then both are sliced to the selected range.
//! The first failure stops the pipeline with a user-facing message.

use momentum_report::{ReportError, ReportInput};
use momentum_traits::{DateRange, MomentumError, ReturnsSource, Symbol, TimeSeries, normalize_symbol};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Why a page could not be rendered.
#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("Ticker {0} does not exist.")]
    UnknownTicker(String),

    #[error("Benchmark ticker {0} does not exist.")]
    UnknownBenchmark(String),

    #[error("No data for benchmark {0} in the specified date range.")]
    NoBenchmarkData(String),

    #[error("No data for stock {0} in the specified date range.")]
    NoStockData(String),

    #[error("An error occurred: {0}")]
    Failed(String),
}

impl From<MomentumError> for LoadError {
    fn from(e: MomentumError) -> Self {
        Self::Failed(e.to_string())
    }
}

impl From<ReportError> for LoadError {
    fn from(e: ReportError) -> Self {
        Self::Failed(e.to_string())
    }
}

/// What to load: a ticker, a date range and an optional benchmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selection {
    pub(crate) symbol: String,
    pub(crate) range: DateRange,
    pub(crate) benchmark: Option<String>,
}

/// The returns of the last stock that was downloaded.
#[derive(Debug, Default)]
pub(crate) struct ReturnsCache {
    slot: RwLock<Option<(Symbol, TimeSeries)>>,
}

impl ReturnsCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Full return history of `symbol`, downloaded only when it differs from
    /// the cached symbol. Unknown tickers are never cached.
    pub(crate) async fn returns(
        &self,
        source: &dyn ReturnsSource,
        symbol: &str,
    ) -> Result<TimeSeries, LoadError> {
        let key = normalize_symbol(symbol);
        if let Some((cached, returns)) = self.slot.read().await.as_ref()
            && *cached == key
        {
            debug!(symbol = %key, "Returns cache hit");
            return Ok(returns.clone());
        }

        debug!(symbol = %key, provider = source.name(), "Returns cache miss");
        let returns = source.download_returns(symbol).await?;
        if returns.is_empty() {
            return Err(LoadError::UnknownTicker(symbol.to_string()));
        }
        *self.slot.write().await = Some((key, returns.clone()));
        Ok(returns)
    }

    /// Symbol currently held, if any.
    #[cfg(test)]
    pub(crate) async fn symbol(&self) -> Option<Symbol> {
        self.slot.read().await.as_ref().map(|(symbol, _)| symbol.clone())
    }
}

/// Run the pipeline for `selection`.
pub(crate) async fn load(
    source: &dyn ReturnsSource,
    cache: &ReturnsCache,
    selection: &Selection,
) -> Result<ReportInput, LoadError> {
    let stock = cache.returns(source, &selection.symbol).await?;

    let benchmark = match &selection.benchmark {
        Some(symbol) => {
            let returns = source.download_returns(symbol).await?;
            if returns.is_empty() {
                return Err(LoadError::UnknownBenchmark(symbol.clone()));
            }
            let returns = returns.within(selection.range);
            if returns.is_empty() {
                return Err(LoadError::NoBenchmarkData(symbol.clone()));
            }
            Some((symbol.clone(), returns))
        }
        None => None,
    };

    let stock = stock.within(selection.range);
    if stock.is_empty() {
        return Err(LoadError::NoStockData(selection.symbol.clone()));
    }

    let mut input = ReportInput::new(selection.symbol.clone(), stock)?;
    if let Some((symbol, returns)) = benchmark {
        input = input.with_benchmark(symbol, returns);
    }
    info!(
        symbol = %input.symbol,
        benchmark = ?input.benchmark_symbol(),
        observations = input.returns.len(),
        "Loaded returns"
    );
    Ok(input)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use momentum_data::InMemorySource;
    use momentum_traits::Date;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    /// One return per calendar day from 2023-01-02 to 2023-12-29.
    pub(crate) fn year_of_returns(seed: u64) -> TimeSeries {
        let mut state = seed;
        let mut dates = Vec::new();
        let mut values = Vec::new();
        let mut day = d(2023, 1, 2);
        while day <= d(2023, 12, 29) {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let unit = (state >> 33) as f64 / (1u64 << 31) as f64;
            dates.push(day);
            values.push((unit - 0.5) * 0.04);
            day = day.succ_opt().unwrap();
        }
        TimeSeries::new(None, dates, values).unwrap()
    }

    pub(crate) fn source() -> InMemorySource {
        InMemorySource::new()
            .with_returns("MSFT", year_of_returns(7))
            .with_returns("SPY", year_of_returns(11))
            .with_returns("OLD", TimeSeries::new(None, vec![d(1999, 1, 4)], vec![0.01]).unwrap())
    }

    fn selection(symbol: &str, benchmark: Option<&str>) -> Selection {
        Selection {
            symbol: symbol.to_string(),
            range: DateRange::new(d(2023, 3, 1), d(2023, 6, 30)).unwrap(),
            benchmark: benchmark.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_load_slices_to_range() {
        let source = source();
        let cache = ReturnsCache::new();
        let input = load(&source, &cache, &selection("MSFT", Some("SPY"))).await.unwrap();

        assert_eq!(input.returns.first_date(), Some(d(2023, 3, 1)));
        assert_eq!(input.returns.last_date(), Some(d(2023, 6, 30)));
        assert_eq!(input.benchmark_symbol(), Some("SPY"));
    }

    #[tokio::test]
    async fn test_cache_reused_for_same_symbol() {
        let source = source();
        let cache = ReturnsCache::new();

        load(&source, &cache, &selection("MSFT", None)).await.unwrap();
        load(&source, &cache, &selection("msft", None)).await.unwrap();
        assert_eq!(source.download_count(), 1);
        assert_eq!(cache.symbol().await.as_deref(), Some("MSFT"));

        // benchmark is fetched on every render
        load(&source, &cache, &selection("MSFT", Some("SPY"))).await.unwrap();
        load(&source, &cache, &selection("MSFT", Some("SPY"))).await.unwrap();
        assert_eq!(source.download_count(), 3);

        // a new symbol replaces the slot
        load(&source, &cache, &selection("SPY", None)).await.unwrap();
        assert_eq!(cache.symbol().await.as_deref(), Some("SPY"));
    }

    #[tokio::test]
    async fn test_error_messages() {
        let source = source();
        let cache = ReturnsCache::new();

        let err = load(&source, &cache, &selection("NOPE", None)).await.unwrap_err();
        assert_eq!(err.to_string(), "Ticker NOPE does not exist.");
        assert_eq!(cache.symbol().await, None);

        let err = load(&source, &cache, &selection("MSFT", Some("ZZZ"))).await.unwrap_err();
        assert_eq!(err.to_string(), "Benchmark ticker ZZZ does not exist.");

        let err = load(&source, &cache, &selection("MSFT", Some("OLD"))).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "No data for benchmark OLD in the specified date range."
        );

        let err = load(&source, &cache, &selection("OLD", None)).await.unwrap_err();
        assert_eq!(err.to_string(), "No data for stock OLD in the specified date range.");
    }

    #[test]
    fn test_other_errors_are_wrapped() {
        let err = LoadError::from(MomentumError::DataFetch("timeout".to_string()));
        assert_eq!(err.to_string(), "An error occurred: Data fetch error: timeout");
    }
}
