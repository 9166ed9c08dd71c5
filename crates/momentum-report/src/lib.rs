//! Reports for MarketMomentum.
//!
//! Turns a sliced return series (and optional benchmark) into the items a
//! user can pick on the dashboard:
//! - [`tables`]: formatted tables with two-decimal cells
//! - [`chart`]: SVG line, bar and heatmap charts
//! - [`custom`]: the two-column custom report layout
//! - [`export`]: HTML and CSV download bundles
//! - [`snapshot`]: the full-page tearsheet
//!
//! # Example
//!
//! ```rust,ignore
//! use momentum_report::{CustomReport, ReportInput, ReportItem, export};
//!
//! let input = ReportInput::new("MSFT", returns)?.with_benchmark("SPY", spy);
//! let report = CustomReport::build(&input, &[ReportItem::MetricsTable, ReportItem::EarningsGraph]);
//! let html = export::html_bundle("MSFT", &report);
//! let csv = export::csv_bundle(&report)?;
//! ```

pub mod chart;
pub mod custom;
pub mod error;
pub mod export;
pub mod format;
pub mod input;
pub mod item;
pub mod snapshot;
pub mod table;
pub mod tables;

pub use chart::{Chart, Figure, Heatmap};
pub use custom::{CustomReport, LayoutRow, layout};
pub use error::{ReportError, Result};
pub use input::{Benchmark, ReportInput};
pub use item::{ItemKind, ReportItem};
pub use snapshot::Tearsheet;
pub use table::Table;
