//! Common types used throughout the MarketMomentum crates.

use serde::{Deserialize, Serialize};

use crate::error::{MomentumError, Result};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier.
///
/// Typically a ticker symbol like "MSFT" or "SPY".
pub type Symbol = String;

/// Normalize user-entered ticker text: trim surrounding whitespace and
/// upper-case it.
///
/// ```
/// use momentum_traits::normalize_symbol;
///
/// assert_eq!(normalize_symbol("  msft "), "MSFT");
/// ```
pub fn normalize_symbol(raw: &str) -> Symbol {
    raw.trim().to_uppercase()
}

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns [`MomentumError::InvalidDate`] if `end` is before `start`.
    pub fn new(start: Date, end: Date) -> Result<Self> {
        if end < start {
            return Err(MomentumError::InvalidDate(format!(
                "end date {end} is before start date {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Last day of the range.
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Whether `date` lies inside the range (both ends included).
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
