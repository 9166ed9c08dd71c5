#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/marketmomentum/momentum/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core type definitions for the MarketMomentum dashboard.
//!
//! This crate provides the foundational abstractions shared by the data,
//! statistics and reporting crates: the dated series container, the
//! returns-provider trait, and the error type.

/// The version of the momentum-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod series;
pub mod source;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{MomentumError, Result};
pub use series::TimeSeries;
pub use source::ReturnsSource;
pub use types::{Date, DateRange, Symbol, normalize_symbol};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
