//! Query-string parsing for the dashboard page.

use std::fmt;

use chrono::NaiveDate;
use momentum_report::ReportItem;
use momentum_traits::DateRange;
use tracing::warn;

use crate::{config::DashboardConfig, data::parse_date, pipeline::{LoadError, Selection}};

/// Which page the user is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Page {
    #[default]
    Home,
    Snapshot,
    CustomReport,
}

impl Page {
    pub(crate) const fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Snapshot => "snapshot",
            Self::CustomReport => "custom-report",
        }
    }

    fn from_slug(slug: &str) -> Option<Self> {
        match slug.trim().to_lowercase().as_str() {
            "home" => Some(Self::Home),
            "snapshot" => Some(Self::Snapshot),
            "custom-report" | "custom report" | "custom_report" => Some(Self::CustomReport),
            _ => None,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::Snapshot => write!(f, "Snapshot"),
            Self::CustomReport => write!(f, "Custom Report"),
        }
    }
}

/// A fully resolved dashboard request: defaults filled in, dates clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DashboardRequest {
    pub(crate) page: Page,
    pub(crate) symbol: String,
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
    /// Earliest selectable start date.
    pub(crate) min_date: NaiveDate,
    /// Today; also the latest selectable date.
    pub(crate) max_date: NaiveDate,
    pub(crate) include_benchmark: bool,
    pub(crate) benchmark: String,
    /// Selected items, in selection order, without duplicates.
    pub(crate) items: Vec<ReportItem>,
}

fn is_checked(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "on" | "yes")
}

fn non_empty(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

impl DashboardRequest {
    /// Resolve the decoded query pairs of a request made on `today`.
    ///
    /// Unknown pages and malformed dates fall back to their defaults. The
    /// start date is clamped to `[earliest, today]` and the end date to
    /// `[start, today]`. Unknown items are dropped.
    pub(crate) fn from_pairs(pairs: &[(String, String)], config: &DashboardConfig, today: NaiveDate) -> Self {
        let get = |key: &str| {
            pairs
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        let date = |key: &str| get(key).and_then(|v| parse_date(v.trim()).ok());

        let page = get("page").and_then(Page::from_slug).unwrap_or_default();

        let min_date = config.earliest_date.min(today);
        let start = date("start")
            .unwrap_or_else(|| config.default_start(today))
            .clamp(min_date, today);
        let end = date("end").unwrap_or(today).clamp(start, today);

        let mut items = Vec::new();
        for (_, name) in pairs.iter().filter(|(k, _)| k == "item") {
            match ReportItem::from_slug(name) {
                Some(item) if !items.contains(&item) => items.push(item),
                Some(_) => {}
                None => warn!(item = %name, "Ignoring unknown report item"),
            }
        }

        Self {
            page,
            symbol: non_empty(get("symbol"), &config.default_symbol),
            start,
            end,
            min_date,
            max_date: today,
            include_benchmark: get("include_benchmark").is_some_and(is_checked),
            benchmark: non_empty(get("benchmark"), &config.default_benchmark),
            items,
        }
    }

    /// Benchmark ticker, when the checkbox is ticked.
    pub(crate) fn benchmark_symbol(&self) -> Option<&str> {
        self.include_benchmark.then_some(self.benchmark.as_str())
    }

    /// The pipeline input for this request.
    pub(crate) fn selection(&self) -> Result<Selection, LoadError> {
        Ok(Selection {
            symbol: self.symbol.clone(),
            range: DateRange::new(self.start, self.end)?,
            benchmark: self.benchmark_symbol().map(String::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReportItem::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2024, 6, 30)
    }

    fn parse(query: &[(&str, &str)]) -> DashboardRequest {
        let pairs: Vec<(String, String)> = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardRequest::from_pairs(&pairs, &DashboardConfig::default(), today())
    }

    #[test]
    fn test_defaults() {
        let request = parse(&[]);
        assert_eq!(request.page, Page::Home);
        assert_eq!(request.symbol, "MSFT");
        assert_eq!(request.start, d(2019, 7, 2));
        assert_eq!(request.end, today());
        assert!(!request.include_benchmark);
        assert_eq!(request.benchmark, "SPY");
        assert_eq!(request.benchmark_symbol(), None);
        assert!(request.items.is_empty());
    }

    #[test]
    fn test_page_parsing() {
        assert_eq!(parse(&[("page", "snapshot")]).page, Page::Snapshot);
        assert_eq!(parse(&[("page", "custom-report")]).page, Page::CustomReport);
        assert_eq!(parse(&[("page", "Custom Report")]).page, Page::CustomReport);
        assert_eq!(parse(&[("page", "settings")]).page, Page::Home);
        assert_eq!(Page::CustomReport.to_string(), "Custom Report");
        assert_eq!(Page::CustomReport.slug(), "custom-report");
    }

    #[test]
    fn test_date_clamping() {
        let request = parse(&[("start", "1970-01-01"), ("end", "2030-01-01")]);
        assert_eq!(request.start, d(1987, 1, 1));
        assert_eq!(request.end, today());

        let request = parse(&[("start", "2024-03-01"), ("end", "2024-01-01")]);
        assert_eq!(request.start, d(2024, 3, 1));
        assert_eq!(request.end, d(2024, 3, 1));

        let request = parse(&[("start", "2025-01-01")]);
        assert_eq!(request.start, today());
        assert_eq!(request.end, today());

        let request = parse(&[("start", "garbage")]);
        assert_eq!(request.start, d(2019, 7, 2));
    }

    #[test]
    fn test_benchmark_checkbox() {
        let request = parse(&[("include_benchmark", "on"), ("benchmark", " QQQ ")]);
        assert_eq!(request.benchmark_symbol(), Some("QQQ"));

        let request = parse(&[("include_benchmark", "on"), ("benchmark", "")]);
        assert_eq!(request.benchmark_symbol(), Some("SPY"));

        let request = parse(&[("benchmark", "QQQ")]);
        assert_eq!(request.benchmark_symbol(), None);
        assert_eq!(request.selection().unwrap().benchmark, None);
    }

    #[test]
    fn test_repeated_items() {
        let request = parse(&[
            ("item", "metrics-table"),
            ("item", "Earnings Graph"),
            ("item", "metrics-table"),
            ("item", "bogus"),
            ("item", "monthly-heatmap-graph"),
        ]);
        assert_eq!(request.items, vec![MetricsTable, EarningsGraph, MonthlyHeatmapGraph]);
    }

    #[test]
    fn test_selection() {
        let request = parse(&[
            ("symbol", "AAPL"),
            ("start", "2024-01-02"),
            ("end", "2024-02-01"),
        ]);
        let selection = request.selection().unwrap();
        assert_eq!(selection.symbol, "AAPL");
        assert_eq!(selection.range.start(), d(2024, 1, 2));
        assert_eq!(selection.range.end(), d(2024, 2, 1));
    }
}
