//! In-memory returns source for tests and offline use.

use async_trait::async_trait;
use momentum_traits::{ReturnsSource, Symbol, TimeSeries, normalize_symbol};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

/// A [`ReturnsSource`] backed by a fixed map of series.
///
/// Symbols are matched after normalisation; unknown symbols return an empty
/// series, mirroring the network providers. The number of downloads served
/// is counted so callers can observe caching.
#[derive(Debug, Default)]
pub struct InMemorySource {
    series: HashMap<Symbol, TimeSeries>,
    downloads: AtomicUsize,
}

impl InMemorySource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the returns of `symbol`, builder style.
    #[must_use]
    pub fn with_returns(mut self, symbol: &str, returns: TimeSeries) -> Self {
        self.insert(symbol, returns);
        self
    }

    /// Register the returns of `symbol`.
    pub fn insert(&mut self, symbol: &str, returns: TimeSeries) {
        let symbol = normalize_symbol(symbol);
        let returns = returns.with_name(symbol.clone());
        self.series.insert(symbol, returns);
    }

    /// Number of downloads served so far.
    pub fn download_count(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReturnsSource for InMemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn download_returns(&self, symbol: &str) -> momentum_traits::Result<TimeSeries> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        let symbol = normalize_symbol(symbol);
        Ok(self
            .series
            .get(&symbol)
            .cloned()
            .unwrap_or_else(|| TimeSeries::empty(Some(symbol))))
    }
}
