//! The data a report is built from.

use momentum_stats::{MetricsConfig, RollingConfig};
use momentum_traits::TimeSeries;

use crate::error::{ReportError, Result};

/// A comparison series shown next to the stock.
#[derive(Debug, Clone)]
pub struct Benchmark {
    /// Ticker of the benchmark
    pub symbol: String,
    /// Daily returns, already sliced to the report range
    pub returns: TimeSeries,
}

/// Everything a report item needs: the stock returns, an optional benchmark
/// and the statistical settings.
#[derive(Debug, Clone)]
pub struct ReportInput {
    /// Ticker of the stock
    pub symbol: String,
    /// Daily returns, already sliced to the report range
    pub returns: TimeSeries,
    /// Optional benchmark
    pub benchmark: Option<Benchmark>,
    /// Settings for the key metrics
    pub metrics: MetricsConfig,
    /// Settings for the rolling ratios
    pub rolling: RollingConfig,
}

impl ReportInput {
    /// Creates an input without benchmark and with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::EmptySeries`] when `returns` has no observation.
    pub fn new(symbol: impl Into<String>, returns: TimeSeries) -> Result<Self> {
        let symbol = symbol.into();
        if returns.is_empty() {
            return Err(ReportError::EmptySeries(symbol));
        }
        Ok(Self {
            symbol,
            returns,
            benchmark: None,
            metrics: MetricsConfig::default(),
            rolling: RollingConfig::default(),
        })
    }

    /// Adds a benchmark.
    ///
    /// A benchmark with the stock's own ticker is labelled `"{symbol} (benchmark)"`
    /// so that table columns stay distinct.
    #[must_use]
    pub fn with_benchmark(mut self, symbol: impl Into<String>, returns: TimeSeries) -> Self {
        let mut symbol = symbol.into();
        if symbol == self.symbol {
            symbol = format!("{symbol} (benchmark)");
        }
        self.benchmark = Some(Benchmark { symbol, returns });
        self
    }

    /// Replaces the metrics settings.
    #[must_use]
    pub const fn with_metrics(mut self, metrics: MetricsConfig) -> Self {
        self.metrics = metrics;
        self
    }

    /// Replaces the rolling settings.
    #[must_use]
    pub const fn with_rolling(mut self, rolling: RollingConfig) -> Self {
        self.rolling = rolling;
        self
    }

    /// Benchmark ticker, if any.
    pub fn benchmark_symbol(&self) -> Option<&str> {
        self.benchmark.as_ref().map(|b| b.symbol.as_str())
    }
}
