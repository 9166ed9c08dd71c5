//! Table builders for the report items.
//!
//! Dated tables list one row per stock observation. Benchmark values are
//! looked up on the stock's dates, so a missing benchmark day is an empty
//! cell rather than a dropped row.

use chrono::Datelike;
use momentum_stats::{
    Frequency, KeyMetrics, drawdown::TABLE_PERIODS, prices, resample, resample_last,
    rolling_sharpe, rolling_sortino, rolling_volatility, worst_drawdown_periods,
};
use momentum_traits::{Date, TimeSeries};

use crate::{
    format::{cell, date_cell},
    input::ReportInput,
    item::ReportItem,
    table::Table,
};

/// How the date column is written.
#[derive(Debug, Clone, Copy)]
enum DateStyle {
    Day,
    Year,
}

impl DateStyle {
    fn format(self, date: Date) -> String {
        match self {
            Self::Day => date_cell(date),
            Self::Year => date.year().to_string(),
        }
    }
}

/// Builds a `Date | stock | benchmark` table from per-series transforms.
fn dated_table(
    item: ReportItem,
    input: &ReportInput,
    style: DateStyle,
    scale: f64,
    transform: impl Fn(&TimeSeries) -> TimeSeries,
) -> Table {
    let stock = transform(&input.returns);
    let benchmark = input
        .benchmark
        .as_ref()
        .map(|b| (b.symbol.clone(), transform(&b.returns)));

    let mut columns = vec!["Date".to_string(), input.symbol.clone()];
    if let Some((symbol, _)) = &benchmark {
        columns.push(symbol.clone());
    }

    let mut table = Table::new(item.label(), columns);
    for (date, value) in stock.iter() {
        let mut row = vec![style.format(date), cell(value * scale)];
        if let Some((_, series)) = &benchmark {
            row.push(series.value_on(date).map_or_else(String::new, |v| cell(v * scale)));
        }
        table.push_row(row);
    }
    table
}

/// Cumulative return (`growth - 1`) of a return series.
fn cumulative_return(returns: &TimeSeries) -> TimeSeries {
    prices(returns).map_values(|p| p - 1.0)
}

/// Daily returns in percent.
pub fn daily_returns(input: &ReportInput) -> Table {
    dated_table(ReportItem::DailyReturnsTable, input, DateStyle::Day, 100.0, TimeSeries::clone)
}

/// Daily cumulative return in percent.
pub fn daily_earnings(input: &ReportInput) -> Table {
    dated_table(
        ReportItem::DailyEarningsTable,
        input,
        DateStyle::Day,
        100.0,
        cumulative_return,
    )
}

/// Month-end cumulative return in percent.
pub fn monthly_earnings(input: &ReportInput) -> Table {
    dated_table(
        ReportItem::MonthlyEarningsTable,
        input,
        DateStyle::Day,
        100.0,
        |r| resample_last(&cumulative_return(r), Frequency::Monthly),
    )
}

/// Year-end cumulative return in percent.
pub fn yearly_earnings(input: &ReportInput) -> Table {
    dated_table(
        ReportItem::YearlyEarningsTable,
        input,
        DateStyle::Year,
        100.0,
        |r| resample_last(&cumulative_return(r), Frequency::Yearly),
    )
}

/// Compounded monthly returns in percent.
pub fn monthly_returns(input: &ReportInput) -> Table {
    dated_table(
        ReportItem::MonthlyReturnsTable,
        input,
        DateStyle::Day,
        100.0,
        |r| resample(r, Frequency::Monthly),
    )
}

/// Compounded yearly returns in percent.
pub fn yearly_returns(input: &ReportInput) -> Table {
    dated_table(
        ReportItem::YearlyReturnsTable,
        input,
        DateStyle::Year,
        100.0,
        |r| resample(r, Frequency::Yearly),
    )
}

/// Rolling Sharpe ratio.
pub fn rolling_sharpe_table(input: &ReportInput) -> Table {
    let config = input.rolling;
    dated_table(ReportItem::RollingSharpeTable, input, DateStyle::Day, 1.0, |r| {
        rolling_sharpe(r, &config)
    })
}

/// Rolling Sortino ratio.
pub fn rolling_sortino_table(input: &ReportInput) -> Table {
    let config = input.rolling;
    dated_table(ReportItem::RollingSortinoTable, input, DateStyle::Day, 1.0, |r| {
        rolling_sortino(r, &config)
    })
}

/// Rolling annualised volatility.
pub fn rolling_volatility_table(input: &ReportInput) -> Table {
    let config = input.rolling;
    dated_table(ReportItem::RollingVolatilityTable, input, DateStyle::Day, 1.0, |r| {
        rolling_volatility(r, &config)
    })
}

/// The worst drawdown periods of the stock, deepest first.
pub fn drawdowns_periods(input: &ReportInput) -> Table {
    let columns = [
        "Start Date",
        "End Date",
        "Valley Date",
        "Days",
        "Drawdown %",
        "99% Max Drawdown %",
    ]
    .map(String::from)
    .to_vec();

    let mut table = Table::new(ReportItem::DrawdownsPeriodsTable.label(), columns);
    for period in worst_drawdown_periods(&input.returns, TABLE_PERIODS) {
        table.push_row(vec![
            date_cell(period.start),
            date_cell(period.end),
            date_cell(period.valley),
            period.days.to_string(),
            cell(period.max_drawdown * 100.0),
            cell(period.max_drawdown_99 * 100.0),
        ]);
    }
    table
}

/// Key metrics of the stock and, when present, the benchmark.
pub fn metrics(input: &ReportInput) -> Table {
    let stock = KeyMetrics::calculate(&input.returns, &input.metrics).rows();
    let benchmark = input
        .benchmark
        .as_ref()
        .map(|b| KeyMetrics::calculate(&b.returns, &input.metrics).rows());

    let mut columns = vec!["Metric".to_string(), input.symbol.clone()];
    columns.extend(input.benchmark_symbol().map(String::from));

    let mut table = Table::new(ReportItem::MetricsTable.label(), columns);
    for (idx, (label, value)) in stock.iter().enumerate() {
        let mut row = vec![(*label).to_string(), cell(*value)];
        if let Some(rows) = &benchmark {
            row.push(cell(rows[idx].1));
        }
        table.push_row(row);
    }
    table
}

/// Builds the table for `item`, or `None` if the item is a graph.
pub fn build(item: ReportItem, input: &ReportInput) -> Option<Table> {
    let table = match item {
        ReportItem::MetricsTable => metrics(input),
        ReportItem::DailyReturnsTable => daily_returns(input),
        ReportItem::DrawdownsPeriodsTable => drawdowns_periods(input),
        ReportItem::DailyEarningsTable => daily_earnings(input),
        ReportItem::MonthlyEarningsTable => monthly_earnings(input),
        ReportItem::YearlyEarningsTable => yearly_earnings(input),
        ReportItem::MonthlyReturnsTable => monthly_returns(input),
        ReportItem::RollingSharpeTable => rolling_sharpe_table(input),
        ReportItem::RollingSortinoTable => rolling_sortino_table(input),
        ReportItem::RollingVolatilityTable => rolling_volatility_table(input),
        ReportItem::YearlyReturnsTable => yearly_returns(input),
        _ => return None,
    };
    Some(table)
}
