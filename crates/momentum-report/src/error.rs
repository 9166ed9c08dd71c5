//! Error types for report building and export.

use thiserror::Error;

/// Errors that can occur while building or exporting reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// DataFrame construction or CSV serialization failed.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Writing an export failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized CSV was not valid UTF-8.
    #[error("Invalid UTF-8 in export: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A report item name was not recognised.
    #[error("Unknown report item: {0}")]
    UnknownItem(String),

    /// The return series to report on is empty.
    #[error("Returns series for {0} is empty")]
    EmptySeries(String),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::UnknownItem("pie-chart".to_string());
        assert_eq!(err.to_string(), "Unknown report item: pie-chart");

        let err = ReportError::EmptySeries("MSFT".to_string());
        assert_eq!(err.to_string(), "Returns series for MSFT is empty");
    }
}
