//! Full-page key-metrics tearsheet.

use std::collections::BTreeMap;

use chrono::Datelike;
use momentum_stats::{Frequency, drawdown::TABLE_PERIODS, resample, worst_drawdown_periods};
use momentum_traits::{DateRange, TimeSeries};
use tracing::info;

use crate::{
    chart::{Chart, graphs},
    error::{ReportError, Result},
    format::{cell, escape_html},
    input::ReportInput,
    table::Table,
    tables,
};

const TEMPLATE: &str = include_str!("snapshot_template.html");

/// A rendered tearsheet: charts, key metrics, end-of-year returns and the
/// worst drawdowns of one stock, optionally against a benchmark.
#[derive(Debug, Clone)]
pub struct Tearsheet {
    title: String,
    range: DateRange,
    benchmark: Option<String>,
    metrics: Table,
    charts: Vec<(&'static str, Chart)>,
    eoy: Table,
    drawdowns: Table,
}

impl Tearsheet {
    /// Builds every section of the tearsheet.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::EmptySeries`] if the returns have no date range.
    pub fn build(input: &ReportInput) -> Result<Self> {
        let range = input
            .returns
            .date_range()
            .ok_or_else(|| ReportError::EmptySeries(input.symbol.clone()))?;

        let charts = vec![
            ("returns", Chart::Figure(graphs::earnings(input))),
            ("log_returns", Chart::Figure(graphs::log_returns(input))),
            ("eoy_returns", Chart::Figure(graphs::yearly_returns(input))),
            ("daily_returns", Chart::Figure(graphs::daily_returns(input))),
            ("rolling_vol", Chart::Figure(graphs::rolling_volatility_graph(input))),
            ("rolling_sharpe", Chart::Figure(graphs::rolling_sharpe_graph(input))),
            ("rolling_sortino", Chart::Figure(graphs::rolling_sortino_graph(input))),
            ("dd_periods", Chart::Figure(graphs::drawdown_periods(input))),
            ("dd_plot", Chart::Figure(graphs::underwater(input))),
            ("monthly_heatmap", Chart::Heatmap(graphs::monthly_heatmap(input))),
            ("returns_dist", Chart::Figure(graphs::daily_distribution(input))),
        ];

        info!(symbol = %input.symbol, benchmark = ?input.benchmark_symbol(), "Built snapshot");
        Ok(Self {
            title: format!("{} Snapshot", input.symbol),
            range,
            benchmark: input.benchmark_symbol().map(String::from),
            metrics: tables::metrics(input),
            charts,
            eoy: eoy_table(input),
            drawdowns: drawdown_table(&input.returns),
        })
    }

    /// Page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// End-of-year returns table.
    pub const fn eoy(&self) -> &Table {
        &self.eoy
    }

    /// Worst drawdowns table.
    pub const fn drawdowns(&self) -> &Table {
        &self.drawdowns
    }

    /// Fills the page template.
    pub fn to_html(&self) -> String {
        let date_range = format!(
            "{} - {}",
            self.range.start().format("%e %b, %Y").to_string().trim(),
            self.range.end().format("%e %b, %Y").to_string().trim()
        );
        let benchmark_title = self
            .benchmark
            .as_ref()
            .map(|b| format!("Benchmark is {} | ", escape_html(b)))
            .unwrap_or_default();
        let eoy_title = if self.benchmark.is_some() {
            "<h3>EOY Returns vs Benchmark</h3>"
        } else {
            "<h3>EOY Returns</h3>"
        };

        let mut html = TEMPLATE
            .replace("{{title}}", &escape_html(&self.title))
            .replace("{{date_range}}", &date_range)
            .replace("{{benchmark_title}}", &benchmark_title)
            .replace("{{v}}", env!("CARGO_PKG_VERSION"))
            .replace("{{metrics}}", &self.metrics.to_html())
            .replace("{{eoy_title}}", eoy_title)
            .replace("{{eoy_table}}", &self.eoy.to_html())
            .replace("{{dd_info}}", &self.drawdowns.to_html());
        for (slot, chart) in &self.charts {
            html = html.replace(&format!("{{{{{slot}}}}}"), &chart.to_html());
        }
        html
    }
}

fn yearly_by_year(returns: &TimeSeries) -> BTreeMap<i32, f64> {
    resample(returns, Frequency::Yearly)
        .iter()
        .map(|(date, value)| (date.year(), value))
        .collect()
}

/// Compounded calendar-year returns in percent; with a benchmark also the
/// ratio of the two and whether the stock won.
fn eoy_table(input: &ReportInput) -> Table {
    let stock = yearly_by_year(&input.returns);
    let benchmark = input.benchmark.as_ref().map(|b| yearly_by_year(&b.returns));

    let columns: Vec<String> = if benchmark.is_some() {
        ["Year", "Benchmark", "Strategy", "Multiplier", "Won"]
            .map(String::from)
            .to_vec()
    } else {
        vec!["Year".to_string(), "Strategy".to_string()]
    };
    let mut table = Table::new("EOY Returns", columns);

    let mut years: Vec<i32> = stock.keys().copied().collect();
    if let Some(bench) = &benchmark {
        years.extend(bench.keys().copied());
        years.sort_unstable();
        years.dedup();
    }

    for year in years {
        let strat = stock.get(&year).copied().unwrap_or(0.0) * 100.0;
        let row = match &benchmark {
            Some(bench) => {
                let bench = bench.get(&year).copied().unwrap_or(0.0) * 100.0;
                let multiplier = if bench.abs() > f64::EPSILON { strat / bench } else { 0.0 };
                let won = if strat > bench { "+" } else { "-" };
                vec![year.to_string(), cell(bench), cell(strat), cell(multiplier), won.to_string()]
            }
            None => vec![year.to_string(), cell(strat)],
        };
        table.push_row(row);
    }
    table
}

fn drawdown_table(returns: &TimeSeries) -> Table {
    let columns = ["Started", "Recovered", "Drawdown", "Days"].map(String::from).to_vec();
    let mut table = Table::new("Worst 10 Drawdowns", columns);
    for period in worst_drawdown_periods(returns, TABLE_PERIODS) {
        table.push_row(vec![
            period.start.format("%Y-%m-%d").to_string(),
            period.end.format("%Y-%m-%d").to_string(),
            cell(period.max_drawdown * 100.0),
            period.days.to_string(),
        ]);
    }
    table
}
