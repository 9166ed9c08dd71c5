//! Graph builders for the report items.

use std::collections::BTreeMap;

use chrono::Datelike;
use momentum_stats::{
    Frequency, Histogram,
    distribution::{CURVE_POINTS, DAILY_BINS, MONTHLY_BINS},
    drawdown::SHADED_PERIODS,
    drawdown_series, normal_curve, prices, resample, rolling_sharpe, rolling_sortino,
    rolling_volatility, worst_drawdown_periods,
};
use momentum_traits::{TimeSeries, stats::mean};

use super::{
    Chart, Figure, Heatmap, Shape, TickFormat, Trace, XAxis, YScale, date_to_x,
    svg::{ACCENT_COLOR, AVERAGE_COLOR, BENCHMARK_COLOR, CURVE_COLOR, CYCLE, STRATEGY_COLOR},
};
use crate::{input::ReportInput, item::ReportItem};

/// Adds the stock line and, when present, the benchmark line.
fn with_series(
    fig: Figure,
    input: &ReportInput,
    transform: impl Fn(&TimeSeries) -> TimeSeries,
) -> Figure {
    let fig = fig.trace(Trace::dated(&input.symbol, &transform(&input.returns), STRATEGY_COLOR));
    match &input.benchmark {
        Some(b) => fig.trace(Trace::dated(&b.symbol, &transform(&b.returns), BENCHMARK_COLOR)),
        None => fig,
    }
}

/// Daily returns of the stock and benchmark.
pub fn daily_returns(input: &ReportInput) -> Figure {
    with_series(
        Figure::new("Daily Returns", "Date", "Returns"),
        input,
        TimeSeries::clone,
    )
}

/// Density histogram of percentage returns, a fitted normal curve and a
/// dotted line at the average.
fn distribution(
    title: &str,
    name: &str,
    values: &[f64],
    bins: usize,
    benchmark: Option<(&str, &[f64])>,
) -> Figure {
    let pct: Vec<f64> = values.iter().map(|v| v * 100.0).collect();
    let hist = Histogram::density(&pct, bins);

    let mut fig = Figure::new(title, "Returns (%)", "Density");
    fig.x_axis = XAxis::Numeric;
    fig = fig.trace(Trace::bars(
        name,
        hist.centers().into_iter().zip(hist.density).collect(),
        STRATEGY_COLOR,
    ));

    if let Some((symbol, values)) = benchmark {
        let pct: Vec<f64> = values.iter().map(|v| v * 100.0).collect();
        let hist = Histogram::density(&pct, bins);
        fig = fig.trace(Trace::bars(
            symbol,
            hist.centers().into_iter().zip(hist.density).collect(),
            ACCENT_COLOR,
        ));
    }

    fig = fig.trace(Trace::line("Distribution", normal_curve(&pct, CURVE_POINTS), CURVE_COLOR));

    let average = mean(&pct);
    if average.is_finite() {
        fig = fig.shape(Shape::VLine {
            x: average,
            color: AVERAGE_COLOR.to_string(),
            label: Some("Average".to_string()),
        });
    }
    fig
}

/// Histogram of daily returns with a 50-bin density.
pub fn daily_distribution(input: &ReportInput) -> Figure {
    distribution(
        "Daily Returns Distribution",
        "Daily Returns",
        input.returns.values(),
        DAILY_BINS,
        input
            .benchmark
            .as_ref()
            .map(|b| (b.symbol.as_str(), b.returns.values())),
    )
}

/// Histogram of compounded monthly returns with a 45-bin density.
pub fn monthly_distribution(input: &ReportInput) -> Figure {
    let monthly = resample(&input.returns, Frequency::Monthly);
    distribution(
        "Monthly Returns Distribution",
        "Monthly Returns",
        monthly.values(),
        MONTHLY_BINS,
        None,
    )
}

/// Underwater plot: drawdown in percent, one trace per calendar year, with
/// the overall average as a dotted line.
pub fn underwater(input: &ReportInput) -> Figure {
    let drawdown = drawdown_series(&input.returns.dropna()).map_values(|v| v * 100.0);

    let mut by_year: BTreeMap<i32, Vec<(f64, f64)>> = BTreeMap::new();
    for (date, value) in drawdown.iter() {
        by_year
            .entry(date.year())
            .or_default()
            .push((date_to_x(date), value));
    }

    let mut fig = Figure::new("Underwater Plot", "Year", "Drawdown (%)");
    fig.show_legend = false;
    for (idx, (year, points)) in by_year.into_iter().enumerate() {
        fig = fig.trace(Trace::line(year.to_string(), points, CYCLE[idx % CYCLE.len()]));
    }
    fig.average_line(mean(drawdown.values()))
}

/// Value of $1 with the worst drawdown periods shaded.
pub fn drawdown_periods(input: &ReportInput) -> Figure {
    let returns = input.returns.dropna();
    let mut fig = Figure::new("Earnings with Worst Drawdown Periods", "Date", "Cumulative Returns")
        .trace(Trace::dated(&input.symbol, &prices(&returns), STRATEGY_COLOR));
    fig.show_legend = false;

    for period in worst_drawdown_periods(&returns, SHADED_PERIODS) {
        fig = fig.shape(Shape::Band {
            x0: date_to_x(period.start),
            x1: date_to_x(period.end),
            color: "#ff0000".to_string(),
            opacity: 0.5,
        });
    }
    fig
}

/// Growth of $1 for the stock and benchmark.
pub fn earnings(input: &ReportInput) -> Figure {
    with_series(Figure::new("Earnings", "Date", "Value of $1"), input, prices)
}

/// Cumulative growth in percent on a logarithmic axis.
pub fn log_returns(input: &ReportInput) -> Figure {
    let mut fig = with_series(
        Figure::new("Cumulative Returns (Log Scaled)", "Date", "Cumulative Returns"),
        input,
        |r| prices(r).map_values(|p| p * 100.0),
    );
    fig.y_scale = YScale::Log;
    fig
}

/// Compounded monthly returns.
pub fn monthly_returns(input: &ReportInput) -> Figure {
    with_series(
        Figure::new("Monthly Returns", "Date", "Returns"),
        input,
        |r| resample(r, Frequency::Monthly),
    )
}

fn rolling_figure(
    title: &str,
    y_title: &str,
    input: &ReportInput,
    stat: impl Fn(&TimeSeries) -> TimeSeries,
) -> Figure {
    let stock = stat(&input.returns);
    let average = mean(stock.values());
    with_series(Figure::new(title, "Date", y_title), input, stat).average_line(average)
}

/// Rolling Sharpe ratio with its average.
pub fn rolling_sharpe_graph(input: &ReportInput) -> Figure {
    let config = input.rolling;
    rolling_figure("Rolling Sharpe Ratio", "Sharpe Ratio", input, |r| {
        rolling_sharpe(r, &config)
    })
}

/// Rolling Sortino ratio with its average.
pub fn rolling_sortino_graph(input: &ReportInput) -> Figure {
    let config = input.rolling;
    rolling_figure("Rolling Sortino Ratio", "Sortino Ratio", input, |r| {
        rolling_sortino(r, &config)
    })
}

/// Rolling volatility with its average.
pub fn rolling_volatility_graph(input: &ReportInput) -> Figure {
    let config = input.rolling;
    rolling_figure("Rolling Volatility", "Volatility", input, |r| {
        rolling_volatility(r, &config)
    })
}

/// Compounded calendar-year returns as bars, with the average yearly return.
pub fn yearly_returns(input: &ReportInput) -> Figure {
    let bars = |series: &TimeSeries| -> Vec<(f64, f64)> {
        resample(series, Frequency::Yearly)
            .iter()
            .map(|(d, v)| (f64::from(d.year()), v))
            .collect()
    };
    let yearly = resample(&input.returns, Frequency::Yearly);

    let mut fig = Figure::new("Yearly Returns", "Date", "Return");
    fig.x_axis = XAxis::Numeric;
    fig.y_format = TickFormat::Percent;
    fig = fig.trace(Trace::bars("EOY Returns", bars(&input.returns), STRATEGY_COLOR));
    if let Some(b) = &input.benchmark {
        fig = fig.trace(Trace::bars(&b.symbol, bars(&b.returns), BENCHMARK_COLOR));
    }
    fig.average_line(mean(yearly.values()))
}

/// Year × month heatmap of compounded monthly returns.
pub fn monthly_heatmap(input: &ReportInput) -> Heatmap {
    Heatmap::from_monthly(
        format!("Monthly Returns Heatmap for {}", input.symbol),
        &resample(&input.returns, Frequency::Monthly),
    )
}

/// Builds the chart for `item`, or `None` if the item is a table.
pub fn build(item: ReportItem, input: &ReportInput) -> Option<Chart> {
    let fig = match item {
        ReportItem::DailyReturnsGraph => daily_returns(input),
        ReportItem::DailyReturnsDistributionGraph => daily_distribution(input),
        ReportItem::DrawdownGraph => underwater(input),
        ReportItem::DrawdownsPeriodsGraph => drawdown_periods(input),
        ReportItem::EarningsGraph => earnings(input),
        ReportItem::MonthlyDistributionGraph => monthly_distribution(input),
        ReportItem::LogReturnsGraph => log_returns(input),
        ReportItem::MonthlyHeatmapGraph => return Some(Chart::Heatmap(monthly_heatmap(input))),
        ReportItem::MonthlyReturnsGraph => monthly_returns(input),
        ReportItem::RollingSharpeGraph => rolling_sharpe_graph(input),
        ReportItem::RollingSortinoGraph => rolling_sortino_graph(input),
        ReportItem::RollingVolatilityGraph => rolling_volatility_graph(input),
        ReportItem::YearlyReturnsGraph => yearly_returns(input),
        _ => return None,
    };
    Some(Chart::Figure(fig))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;
    use approx::assert_relative_eq;
    use chrono::Days;
    use momentum_traits::Date;

    fn series(n: usize, seed: u64) -> TimeSeries {
        let start = Date::from_ymd_opt(2022, 1, 3).unwrap();
        let mut state = seed;
        let mut dates = Vec::with_capacity(n);
        let mut values = Vec::with_capacity(n);
        for i in 0..n {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            dates.push(start + Days::new(i as u64));
            values.push(((state >> 33) as f64 / (1u64 << 31) as f64 - 0.5) * 0.04);
        }
        TimeSeries::new(None, dates, values).unwrap()
    }

    fn input(with_benchmark: bool) -> ReportInput {
        let input = ReportInput::new("MSFT", series(400, 7)).unwrap();
        if with_benchmark {
            input.with_benchmark("SPY", series(400, 11))
        } else {
            input
        }
    }

    #[test]
    fn test_build_covers_every_graph_item() {
        let input = input(true);
        for item in ReportItem::ALL {
            let chart = build(item, &input);
            assert_eq!(chart.is_some(), item.kind() == ItemKind::Graph, "{item}");
            if let Some(chart) = chart {
                assert!(chart.to_svg().ends_with("</svg>"));
            }
        }
    }

    #[test]
    fn test_benchmark_traces() {
        assert_eq!(earnings(&input(false)).traces.len(), 1);
        let fig = earnings(&input(true));
        assert_eq!(fig.traces.len(), 2);
        assert_eq!(fig.traces[1].name, "SPY");
        assert_eq!(fig.traces[1].color, BENCHMARK_COLOR);
        // the monthly histogram is stock only
        assert_eq!(monthly_distribution(&input(true)).traces.len(), 2);
    }

    #[test]
    fn test_underwater_traces_per_year() {
        let fig = underwater(&input(false));
        // 400 days from 2022-01-03 reach into 2023
        assert_eq!(fig.traces.len(), 2);
        assert_eq!(fig.traces[0].name, "2022");
        assert!(!fig.show_legend);
        assert!(fig.traces.iter().flat_map(|t| &t.points).all(|p| p.1 <= 0.0));
        assert!(matches!(fig.shapes[0], Shape::HLine { y, .. } if y <= 0.0));
    }

    #[test]
    fn test_drawdown_periods_shades_worst_five() {
        let input = input(false);
        let fig = drawdown_periods(&input);
        let expected = worst_drawdown_periods(&input.returns, usize::MAX)
            .len()
            .min(SHADED_PERIODS);
        assert!(expected > 0);
        let bands = fig
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Band { .. }))
            .count();
        assert_eq!(bands, expected);
    }

    #[test]
    fn test_distribution_average_line() {
        let fig = daily_distribution(&input(false));
        let Shape::VLine { x, label, .. } = &fig.shapes[0] else {
            panic!("expected the average line");
        };
        assert_relative_eq!(*x, mean(input(false).returns.values()) * 100.0, epsilon = 1e-9);
        assert_eq!(label.as_deref(), Some("Average"));
        assert_eq!(fig.traces[0].points.len(), DAILY_BINS);
    }

    #[test]
    fn test_yearly_returns_bars() {
        let fig = yearly_returns(&input(true));
        assert_eq!(fig.traces[0].name, "EOY Returns");
        assert_eq!(fig.traces[0].kind, crate::chart::TraceKind::Bar);
        let years: Vec<f64> = fig.traces[0].points.iter().map(|p| p.0).collect();
        assert_eq!(years, vec![2022.0, 2023.0]);
        assert_eq!(fig.y_format, TickFormat::Percent);
    }

    #[test]
    fn test_heatmap_title_uses_symbol() {
        let map = monthly_heatmap(&input(false));
        assert_eq!(map.title, "Monthly Returns Heatmap for MSFT");
        assert_eq!(map.years, vec![2022, 2023]);
    }
}
