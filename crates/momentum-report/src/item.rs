//! The selectable items of a custom report.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Whether an item renders as a chart or a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// An SVG figure
    Graph,
    /// A table of formatted cells
    Table,
}

/// One option of the report multi-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportItem {
    /// Key metrics for the stock and benchmark
    MetricsTable,
    /// Daily returns line chart
    DailyReturnsGraph,
    /// Daily returns in percent
    DailyReturnsTable,
    /// Histogram of daily returns with a fitted normal curve
    DailyReturnsDistributionGraph,
    /// Underwater plot coloured by year
    DrawdownGraph,
    /// Earnings with the worst drawdown periods shaded
    DrawdownsPeriodsGraph,
    /// The ten worst drawdown periods
    DrawdownsPeriodsTable,
    /// Value of $1 over time
    EarningsGraph,
    /// Daily cumulative return in percent
    DailyEarningsTable,
    /// Month-end cumulative return in percent
    MonthlyEarningsTable,
    /// Year-end cumulative return in percent
    YearlyEarningsTable,
    /// Histogram of monthly returns
    MonthlyDistributionGraph,
    /// Cumulative returns on a log axis
    LogReturnsGraph,
    /// Year by month return heatmap
    MonthlyHeatmapGraph,
    /// Monthly returns line chart
    MonthlyReturnsGraph,
    /// Monthly returns in percent
    MonthlyReturnsTable,
    /// Rolling Sharpe ratio chart
    RollingSharpeGraph,
    /// Rolling Sharpe ratio values
    RollingSharpeTable,
    /// Rolling Sortino ratio chart
    RollingSortinoGraph,
    /// Rolling Sortino ratio values
    RollingSortinoTable,
    /// Rolling volatility chart
    RollingVolatilityGraph,
    /// Rolling volatility values
    RollingVolatilityTable,
    /// Yearly returns bar chart
    YearlyReturnsGraph,
    /// Yearly returns in percent
    YearlyReturnsTable,
}

impl ReportItem {
    /// Every item, in multi-select order.
    pub const ALL: [Self; 24] = [
        Self::MetricsTable,
        Self::DailyReturnsGraph,
        Self::DailyReturnsTable,
        Self::DailyReturnsDistributionGraph,
        Self::DrawdownGraph,
        Self::DrawdownsPeriodsGraph,
        Self::DrawdownsPeriodsTable,
        Self::EarningsGraph,
        Self::DailyEarningsTable,
        Self::MonthlyEarningsTable,
        Self::YearlyEarningsTable,
        Self::MonthlyDistributionGraph,
        Self::LogReturnsGraph,
        Self::MonthlyHeatmapGraph,
        Self::MonthlyReturnsGraph,
        Self::MonthlyReturnsTable,
        Self::RollingSharpeGraph,
        Self::RollingSharpeTable,
        Self::RollingSortinoGraph,
        Self::RollingSortinoTable,
        Self::RollingVolatilityGraph,
        Self::RollingVolatilityTable,
        Self::YearlyReturnsGraph,
        Self::YearlyReturnsTable,
    ];

    /// Display label, also used as the table title.
    pub const fn label(self) -> &'static str {
        match self {
            Self::MetricsTable => "Metrics Table",
            Self::DailyReturnsGraph => "Daily Returns Graph",
            Self::DailyReturnsTable => "Daily Returns Table (%)",
            Self::DailyReturnsDistributionGraph => "Daily Returns Distribution Graph",
            Self::DrawdownGraph => "Drawdown Graph",
            Self::DrawdownsPeriodsGraph => "Drawdowns Periods Graph",
            Self::DrawdownsPeriodsTable => "Drawdowns Periods Table",
            Self::EarningsGraph => "Earnings Graph",
            Self::DailyEarningsTable => "Daily Earnings Table (%)",
            Self::MonthlyEarningsTable => "Monthly Earnings Table (%)",
            Self::YearlyEarningsTable => "Yearly Earnings Table (%)",
            Self::MonthlyDistributionGraph => "Monthly Distribution Graph",
            Self::LogReturnsGraph => "Log Returns Graph",
            Self::MonthlyHeatmapGraph => "Monthly Heatmap Graph",
            Self::MonthlyReturnsGraph => "Monthly Returns Graph",
            Self::MonthlyReturnsTable => "Monthly Returns Table (%)",
            Self::RollingSharpeGraph => "Rolling Sharpe Graph",
            Self::RollingSharpeTable => "Rolling Sharpe Table",
            Self::RollingSortinoGraph => "Rolling Sortino Graph",
            Self::RollingSortinoTable => "Rolling Sortino Table",
            Self::RollingVolatilityGraph => "Rolling Volatility Graph",
            Self::RollingVolatilityTable => "Rolling Volatility Table",
            Self::YearlyReturnsGraph => "Yearly Returns Graph",
            Self::YearlyReturnsTable => "Yearly Returns Table (%)",
        }
    }

    /// URL-safe identifier used in query strings.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::MetricsTable => "metrics-table",
            Self::DailyReturnsGraph => "daily-returns-graph",
            Self::DailyReturnsTable => "daily-returns-table",
            Self::DailyReturnsDistributionGraph => "daily-returns-distribution-graph",
            Self::DrawdownGraph => "drawdown-graph",
            Self::DrawdownsPeriodsGraph => "drawdowns-periods-graph",
            Self::DrawdownsPeriodsTable => "drawdowns-periods-table",
            Self::EarningsGraph => "earnings-graph",
            Self::DailyEarningsTable => "daily-earnings-table",
            Self::MonthlyEarningsTable => "monthly-earnings-table",
            Self::YearlyEarningsTable => "yearly-earnings-table",
            Self::MonthlyDistributionGraph => "monthly-distribution-graph",
            Self::LogReturnsGraph => "log-returns-graph",
            Self::MonthlyHeatmapGraph => "monthly-heatmap-graph",
            Self::MonthlyReturnsGraph => "monthly-returns-graph",
            Self::MonthlyReturnsTable => "monthly-returns-table",
            Self::RollingSharpeGraph => "rolling-sharpe-graph",
            Self::RollingSharpeTable => "rolling-sharpe-table",
            Self::RollingSortinoGraph => "rolling-sortino-graph",
            Self::RollingSortinoTable => "rolling-sortino-table",
            Self::RollingVolatilityGraph => "rolling-volatility-graph",
            Self::RollingVolatilityTable => "rolling-volatility-table",
            Self::YearlyReturnsGraph => "yearly-returns-graph",
            Self::YearlyReturnsTable => "yearly-returns-table",
        }
    }

    /// Graph or table.
    pub const fn kind(self) -> ItemKind {
        match self {
            Self::MetricsTable
            | Self::DailyReturnsTable
            | Self::DrawdownsPeriodsTable
            | Self::DailyEarningsTable
            | Self::MonthlyEarningsTable
            | Self::YearlyEarningsTable
            | Self::MonthlyReturnsTable
            | Self::RollingSharpeTable
            | Self::RollingSortinoTable
            | Self::RollingVolatilityTable
            | Self::YearlyReturnsTable => ItemKind::Table,
            _ => ItemKind::Graph,
        }
    }

    /// Whether the item spans the full page width instead of one column.
    pub const fn full_width(self) -> bool {
        matches!(self, Self::MonthlyHeatmapGraph)
    }

    /// Looks an item up by slug or display label.
    pub fn from_slug(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|item| item.slug() == name || item.label() == name)
    }
}

impl fmt::Display for ReportItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportItem {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| ReportError::UnknownItem(s.to_string()))
    }
}
