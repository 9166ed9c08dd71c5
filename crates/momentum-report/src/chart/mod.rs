//! SVG charts.
//!
//! A [`Figure`] is a small declarative description (traces, guide shapes,
//! axis settings) rendered to a standalone SVG. The monthly heatmap has its
//! own layout in [`Heatmap`]. Per-item builders live in [`graphs`].

pub mod graphs;
mod heatmap;
pub(crate) mod svg;

use chrono::{Datelike, Months};
use momentum_traits::{Date, TimeSeries};
use serde::{Deserialize, Serialize};

use crate::format::{number_tick, percent_tick};
use svg::{Frame, HEIGHT, WIDTH};

pub use heatmap::Heatmap;

/// Converts a date to the numeric x coordinate used by figures.
pub fn date_to_x(date: Date) -> f64 {
    f64::from(date.num_days_from_ce())
}

fn x_to_date(x: f64) -> Option<Date> {
    Date::from_num_days_from_ce_opt(x.round() as i32)
}

/// Interpretation of the x coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XAxis {
    /// Days from the common era, labelled as calendar dates
    Date,
    /// Plain numbers
    Numeric,
}

/// Vertical scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YScale {
    /// Linear
    Linear,
    /// Base-10 logarithmic; non-positive values are not drawn
    Log,
}

/// Tick label style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickFormat {
    /// Plain numbers
    Number,
    /// Fractions shown as whole percentages
    Percent,
}

/// How a trace is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceKind {
    /// Connected line
    Line,
    /// One bar per point
    Bar,
}

/// A named data series of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Legend label
    pub name: String,
    /// Line or bars
    pub kind: TraceKind,
    /// `(x, y)` points in data coordinates
    pub points: Vec<(f64, f64)>,
    /// Stroke or fill colour
    pub color: String,
    /// Draw the line dashed
    pub dashed: bool,
}

impl Trace {
    /// A solid line.
    pub fn line(name: impl Into<String>, points: Vec<(f64, f64)>, color: &str) -> Self {
        Self {
            name: name.into(),
            kind: TraceKind::Line,
            points,
            color: color.to_string(),
            dashed: false,
        }
    }

    /// A bar series.
    pub fn bars(name: impl Into<String>, points: Vec<(f64, f64)>, color: &str) -> Self {
        Self {
            kind: TraceKind::Bar,
            ..Self::line(name, points, color)
        }
    }

    /// A line through the observations of a dated series.
    pub fn dated(name: impl Into<String>, series: &TimeSeries, color: &str) -> Self {
        let points = series.iter().map(|(d, v)| (date_to_x(d), v)).collect();
        Self::line(name, points, color)
    }
}

/// Guide shapes drawn over or under the traces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Dotted horizontal line across the plot
    HLine {
        /// Data y coordinate
        y: f64,
        /// Stroke colour
        color: String,
    },
    /// Dotted vertical line with an optional label
    VLine {
        /// Data x coordinate
        x: f64,
        /// Stroke colour
        color: String,
        /// Text drawn next to the line
        label: Option<String>,
    },
    /// Shaded vertical band spanning the plot height
    Band {
        /// Left edge
        x0: f64,
        /// Right edge
        x1: f64,
        /// Fill colour
        color: String,
        /// Fill opacity
        opacity: f64,
    },
}

/// A line or bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Chart title
    pub title: String,
    /// Label under the x axis
    pub x_title: String,
    /// Label beside the y axis
    pub y_title: String,
    /// How x values are labelled
    pub x_axis: XAxis,
    /// Linear or log y
    pub y_scale: YScale,
    /// How y ticks are labelled
    pub y_format: TickFormat,
    /// Data series in drawing order
    pub traces: Vec<Trace>,
    /// Guide lines and bands
    pub shapes: Vec<Shape>,
    /// Whether to draw the legend
    pub show_legend: bool,
}

impl Figure {
    /// An empty date-axis figure.
    pub fn new(title: impl Into<String>, x_title: &str, y_title: &str) -> Self {
        Self {
            title: title.into(),
            x_title: x_title.to_string(),
            y_title: y_title.to_string(),
            x_axis: XAxis::Date,
            y_scale: YScale::Linear,
            y_format: TickFormat::Number,
            traces: Vec::new(),
            shapes: Vec::new(),
            show_legend: true,
        }
    }

    /// Adds a trace.
    #[must_use]
    pub fn trace(mut self, trace: Trace) -> Self {
        self.traces.push(trace);
        self
    }

    /// Adds a shape.
    #[must_use]
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Adds a red dotted horizontal line at `y` when it is finite.
    #[must_use]
    pub fn average_line(self, y: f64) -> Self {
        if !y.is_finite() {
            return self;
        }
        self.shape(Shape::HLine {
            y,
            color: svg::AVERAGE_COLOR.to_string(),
        })
    }

    fn y_transform(&self, y: f64) -> Option<f64> {
        match self.y_scale {
            YScale::Linear => Some(y).filter(|v| v.is_finite()),
            YScale::Log => Some(y).filter(|v| v.is_finite() && *v > 0.0).map(f64::log10),
        }
    }

    /// Smallest gap between bar x values, used as the bar slot width.
    fn bar_slot(&self) -> Option<f64> {
        let mut xs: Vec<f64> = self
            .traces
            .iter()
            .filter(|t| t.kind == TraceKind::Bar)
            .flat_map(|t| t.points.iter().map(|p| p.0))
            .collect();
        if xs.is_empty() {
            return None;
        }
        xs.sort_by(f64::total_cmp);
        xs.dedup();
        let gap = xs
            .windows(2)
            .map(|w| w[1] - w[0])
            .reduce(f64::min)
            .unwrap_or(1.0);
        Some(gap)
    }

    fn x_extent(&self, slot: Option<f64>) -> Option<(f64, f64)> {
        let trace_xs = self.traces.iter().flat_map(|t| t.points.iter().map(|p| p.0));
        let shape_xs = self.shapes.iter().flat_map(|s| match s {
            Shape::VLine { x, .. } => vec![*x],
            Shape::Band { x0, x1, .. } => vec![*x0, *x1],
            Shape::HLine { .. } => Vec::new(),
        });
        let (min, max) = extent(trace_xs.chain(shape_xs))?;
        let pad = slot.map_or(0.0, |s| s / 2.0);
        Some((min - pad, max + pad))
    }

    fn y_extent(&self) -> Option<(f64, f64)> {
        let trace_ys = self
            .traces
            .iter()
            .flat_map(|t| t.points.iter().filter_map(|p| self.y_transform(p.1)));
        let guide_ys = self.shapes.iter().filter_map(|s| match s {
            Shape::HLine { y, .. } => self.y_transform(*y),
            _ => None,
        });
        let has_bars = self.traces.iter().any(|t| t.kind == TraceKind::Bar);
        let zero = (has_bars && self.y_scale == YScale::Linear).then_some(0.0);

        let (mut min, mut max) = extent(trace_ys.chain(guide_ys).chain(zero))?;
        if min == max {
            let adjust = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
            min -= adjust;
            max += adjust;
        } else {
            let margin = (max - min) * 0.05;
            min -= margin;
            max += margin;
        }
        Some((min, max))
    }

    fn y_ticks(&self, (min, max): (f64, f64)) -> Vec<(f64, String)> {
        match self.y_scale {
            YScale::Log => (min.ceil() as i32..=max.floor() as i32)
                .map(|exp| (f64::from(exp), log_tick(10f64.powi(exp))))
                .collect(),
            YScale::Linear => {
                let (ticks, step) = svg::nice_ticks(min, max, 5);
                ticks
                    .into_iter()
                    .map(|t| {
                        let label = match self.y_format {
                            TickFormat::Percent => percent_tick(t),
                            TickFormat::Number => number_tick(t, step),
                        };
                        (t, label)
                    })
                    .collect()
            }
        }
    }

    fn x_ticks(&self, (min, max): (f64, f64)) -> Vec<(f64, String)> {
        match self.x_axis {
            XAxis::Numeric => {
                let (ticks, step) = svg::nice_ticks(min, max, 6);
                ticks.into_iter().map(|t| (t, number_tick(t, step))).collect()
            }
            XAxis::Date => date_ticks(min, max),
        }
    }

    /// Renders the figure as a standalone SVG element.
    pub fn to_svg(&self) -> String {
        let frame = Frame::standard();
        let mut out = svg::header(WIDTH, HEIGHT);

        let slot = self.bar_slot();
        let (Some(xr), Some(yr)) = (self.x_extent(slot), self.y_extent()) else {
            svg::text(&mut out, WIDTH / 2.0, HEIGHT / 2.0, "middle", "No data");
            out.push_str(svg::footer());
            return out;
        };

        // bands sit under the grid and the data
        for shape in &self.shapes {
            if let Shape::Band { x0, x1, color, opacity } = shape {
                let (a, b) = (frame.x(*x0, xr), frame.x(*x1, xr));
                svg::rect(&mut out, a, frame.top, (b - a).max(1.0), frame.bottom - frame.top, color, *opacity);
            }
        }

        for (value, label) in self.y_ticks(yr) {
            let y = frame.y(value, yr);
            svg::line(&mut out, (frame.left, y), (frame.right, y), "#eeeeee", 0.5, false);
            svg::text(&mut out, frame.left - 4.0, y + 3.0, "end", &label);
        }
        for (value, label) in self.x_ticks(xr) {
            let x = frame.x(value, xr);
            svg::line(&mut out, (x, frame.bottom), (x, frame.bottom + 4.0), "#cccccc", 1.0, false);
            svg::text(&mut out, x, frame.bottom + 14.0, "middle", &label);
        }
        svg::line(&mut out, (frame.left, frame.bottom), (frame.right, frame.bottom), "#000000", 1.0, false);

        let bar_traces = self.traces.iter().filter(|t| t.kind == TraceKind::Bar).count();
        let mut bar_idx = 0;
        for trace in &self.traces {
            match trace.kind {
                TraceKind::Line => {
                    let points: Vec<(f64, f64)> = trace
                        .points
                        .iter()
                        .filter_map(|(x, y)| {
                            self.y_transform(*y).map(|ty| (frame.x(*x, xr), frame.y(ty, yr)))
                        })
                        .collect();
                    svg::polyline(&mut out, &points, &trace.color, trace.dashed);
                }
                TraceKind::Bar => {
                    let slot_px = frame.x(xr.0 + slot.unwrap_or(1.0), xr) - frame.left;
                    let bar_w = slot_px * 0.8 / bar_traces.max(1) as f64;
                    let zero_y = frame.y(0.0_f64.clamp(yr.0, yr.1), yr);
                    for (x, y) in &trace.points {
                        let Some(ty) = self.y_transform(*y) else {
                            continue;
                        };
                        let cx = frame.x(*x, xr) - slot_px * 0.4 + bar_w * bar_idx as f64;
                        let py = frame.y(ty, yr);
                        svg::rect(&mut out, cx, py.min(zero_y), bar_w, (py - zero_y).abs(), &trace.color, 1.0);
                    }
                    bar_idx += 1;
                }
            }
        }

        for shape in &self.shapes {
            match shape {
                Shape::HLine { y, color } => {
                    if let Some(ty) = self.y_transform(*y) {
                        let py = frame.y(ty, yr);
                        svg::line(&mut out, (frame.left, py), (frame.right, py), color, 2.0, true);
                    }
                }
                Shape::VLine { x, color, label } => {
                    let px = frame.x(*x, xr);
                    svg::line(&mut out, (px, frame.top), (px, frame.bottom), color, 2.0, true);
                    if let Some(label) = label {
                        svg::text(&mut out, px - 4.0, frame.top + 10.0, "end", label);
                    }
                }
                Shape::Band { .. } => {}
            }
        }

        svg::text(&mut out, (frame.left + frame.right) / 2.0, HEIGHT - 6.0, "middle", &self.x_title);
        svg::vertical_text(&mut out, 12.0, (frame.top + frame.bottom) / 2.0, &self.y_title);

        if self.show_legend {
            let entries: Vec<(&str, &str)> = self
                .traces
                .iter()
                .filter(|t| !t.name.is_empty())
                .map(|t| (t.name.as_str(), t.color.as_str()))
                .collect();
            svg::legend(&mut out, &frame, &entries);
        }

        out.push_str(svg::footer());
        out
    }
}

/// Min and max of the finite values.
fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
}

/// Tick label for a log-scaled percentage axis.
fn log_tick(value: f64) -> String {
    if value >= 1e6 {
        format!("{:.0} mil%", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.0}k%", value / 1e3)
    } else {
        number_tick(value, value) + "%"
    }
}

/// Year ticks for long ranges, month ticks for short ones.
fn date_ticks(min: f64, max: f64) -> Vec<(f64, String)> {
    let (Some(start), Some(end)) = (x_to_date(min), x_to_date(max)) else {
        return Vec::new();
    };
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let (step, fmt) = match months {
        m if m > 24 => (12 * ((m / 12) / 8 + 1) as u32, "%Y"),
        m => ((m as u32 / 6).max(1), "%Y-%m"),
    };

    let first = if fmt == "%Y" {
        Date::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        Date::from_ymd_opt(start.year(), start.month(), 1)
            .and_then(|d| d.checked_add_months(Months::new(1)))
    };

    let mut ticks = Vec::new();
    let mut current = first;
    while let Some(date) = current.filter(|d| *d <= end) {
        ticks.push((date_to_x(date), date.format(fmt).to_string()));
        current = date.checked_add_months(Months::new(step));
    }
    ticks
}

/// A rendered graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Chart {
    /// Line or bar chart
    Figure(Figure),
    /// Year by month heatmap
    Heatmap(Heatmap),
}

impl Chart {
    /// Title shown above the chart.
    pub fn title(&self) -> &str {
        match self {
            Self::Figure(fig) => &fig.title,
            Self::Heatmap(map) => &map.title,
        }
    }

    /// Standalone SVG.
    pub fn to_svg(&self) -> String {
        match self {
            Self::Figure(fig) => fig.to_svg(),
            Self::Heatmap(map) => map.to_svg(),
        }
    }

    /// SVG wrapped in a titled `<div>`.
    pub fn to_html(&self) -> String {
        svg::wrap_plot(self.title(), &self.to_svg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_date_roundtrip() {
        let date = d(2024, 2, 29);
        assert_eq!(x_to_date(date_to_x(date)), Some(date));
    }

    #[test]
    fn test_date_ticks() {
        let ticks = date_ticks(date_to_x(d(2019, 6, 1)), date_to_x(d(2024, 6, 1)));
        let labels: Vec<&str> = ticks.iter().map(|t| t.1.as_str()).collect();
        assert_eq!(labels, vec!["2020", "2021", "2022", "2023", "2024"]);

        let ticks = date_ticks(date_to_x(d(2024, 1, 15)), date_to_x(d(2024, 4, 20)));
        let labels: Vec<&str> = ticks.iter().map(|t| t.1.as_str()).collect();
        assert_eq!(labels, vec!["2024-02", "2024-03", "2024-04"]);
    }

    #[test]
    fn test_log_ticks() {
        assert_eq!(log_tick(100.0), "100%");
        assert_eq!(log_tick(1000.0), "1k%");
        assert_eq!(log_tick(1e6), "1 mil%");
    }

    #[test]
    fn test_line_figure_svg() {
        let fig = Figure::new("Earnings", "Date", "Value of $1")
            .trace(Trace::line("MSFT", vec![(0.0, 1.0), (1.0, 1.5), (2.0, 1.2)], svg::STRATEGY_COLOR))
            .average_line(1.2)
            .average_line(f64::NAN);
        assert_eq!(fig.shapes.len(), 1);

        let svg = fig.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert!(svg.contains("Value of $1"));
        assert!(svg.contains(">MSFT</text>"));
    }

    #[test]
    fn test_bar_figure_includes_zero() {
        let fig = Figure::new("Yearly Returns", "Date", "Return").trace(Trace::bars(
            "EOY Returns",
            vec![(0.0, 0.1), (365.0, 0.3)],
            svg::STRATEGY_COLOR,
        ));
        let (min, _) = fig.y_extent().unwrap();
        assert!(min < 0.0);
        assert_eq!(fig.to_svg().matches("<rect").count(), 2);
    }

    #[test]
    fn test_log_scale_skips_non_positive() {
        let mut fig = Figure::new("Cumulative Returns (Log Scaled)", "Date", "Cumulative Returns")
            .trace(Trace::line("MSFT", vec![(0.0, 100.0), (1.0, 0.0), (2.0, 1000.0)], "#000"));
        fig.y_scale = YScale::Log;
        let (min, max) = fig.y_extent().unwrap();
        assert!(min < 2.0 && max > 3.0);
        let svg = fig.to_svg();
        assert!(svg.contains("1k%"));
    }

    #[test]
    fn test_empty_figure() {
        let svg = Figure::new("Empty", "Date", "Value").to_svg();
        assert!(svg.contains("No data"));
    }

    #[test]
    fn test_chart_html() {
        let chart = Chart::Figure(Figure::new("Daily Returns", "Date", "Returns"));
        let html = chart.to_html();
        assert!(html.contains(r#"<div class="mm-plot-title">Daily Returns</div>"#));
    }
}
