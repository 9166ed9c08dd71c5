//! Return-series analytics for MarketMomentum.
//!
//! This crate provides the stateless transforms behind every chart and table
//! of the dashboard:
//! - Cumulative price and drawdown series
//! - Drawdown period extraction and the worst-N ranking
//! - Monthly and yearly resampling
//! - Rolling Sharpe, Sortino and volatility
//! - The 27 key summary metrics
//! - Histogram densities and fitted normal curves
//!
//! # Example
//!
//! ```rust,ignore
//! use momentum_stats::{KeyMetrics, MetricsConfig, worst_drawdown_periods};
//!
//! let metrics = KeyMetrics::calculate(&returns, &MetricsConfig::default());
//! let worst = worst_drawdown_periods(&returns, 10);
//! ```

pub mod distribution;
pub mod drawdown;
pub mod metrics;
pub mod resample;
pub mod rolling;
pub mod transform;

// Re-export main types
pub use distribution::{Histogram, normal_curve};
pub use drawdown::{DrawdownPeriod, drawdown_periods, worst_drawdown_periods};
pub use metrics::{KeyMetrics, METRIC_LABELS, MetricsConfig};
pub use resample::{Frequency, resample, resample_last};
pub use rolling::{RollingConfig, rolling_sharpe, rolling_sortino, rolling_volatility};
pub use transform::{compounded, cumulative_growth, drawdown_series, prices};
