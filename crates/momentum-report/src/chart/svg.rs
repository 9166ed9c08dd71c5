//! Low-level SVG drawing helpers.

use std::fmt::Write;

use crate::format::escape_html;

pub(crate) const WIDTH: f64 = 576.0;
pub(crate) const HEIGHT: f64 = 288.0;
pub(crate) const PADDING: f64 = 36.0;

pub(crate) const STRATEGY_COLOR: &str = "#348dc1";
pub(crate) const BENCHMARK_COLOR: &str = "#000000";
pub(crate) const ACCENT_COLOR: &str = "#8c8c8c";
pub(crate) const AVERAGE_COLOR: &str = "#ff0000";
pub(crate) const CURVE_COLOR: &str = "#ff9933";

/// Colour cycle for per-year traces.
pub(crate) const CYCLE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

/// Opening `<svg>` tag with the shared text style.
pub(crate) fn header(width: f64, height: f64) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width:.0} {height:.0}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#666}}</style>"#
    )
}

pub(crate) const fn footer() -> &'static str {
    "</svg>"
}

/// Wraps an SVG in the titled plot container.
pub(crate) fn wrap_plot(title: &str, svg: &str) -> String {
    format!(
        r#"<div class="mm-plot"><div class="mm-plot-title">{}</div>{svg}</div>"#,
        escape_html(title)
    )
}

/// A plot area in pixel coordinates.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub(crate) left: f64,
    pub(crate) right: f64,
    pub(crate) top: f64,
    pub(crate) bottom: f64,
}

impl Frame {
    pub(crate) fn standard() -> Self {
        Self {
            left: PADDING + 20.0,
            right: WIDTH - PADDING / 2.0,
            top: PADDING / 2.0,
            bottom: HEIGHT - PADDING,
        }
    }

    /// Maps `value` in `[min, max]` onto the horizontal span.
    pub(crate) fn x(&self, value: f64, (min, max): (f64, f64)) -> f64 {
        if (max - min).abs() < f64::EPSILON {
            return (self.left + self.right) / 2.0;
        }
        self.left + (value - min) / (max - min) * (self.right - self.left)
    }

    /// Maps `value` in `[min, max]` onto the vertical span, upwards.
    pub(crate) fn y(&self, value: f64, (min, max): (f64, f64)) -> f64 {
        if (max - min).abs() < f64::EPSILON {
            return (self.top + self.bottom) / 2.0;
        }
        self.bottom - (value - min) / (max - min) * (self.bottom - self.top)
    }
}

pub(crate) fn line(
    svg: &mut String,
    (x1, y1): (f64, f64),
    (x2, y2): (f64, f64),
    stroke: &str,
    width: f64,
    dashed: bool,
) {
    let dash = if dashed { "2 3" } else { "0" };
    let _ = write!(
        svg,
        r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{stroke}" stroke-width="{width}" stroke-dasharray="{dash}" />"#
    );
}

pub(crate) fn polyline(svg: &mut String, points: &[(f64, f64)], stroke: &str, dashed: bool) {
    if points.is_empty() {
        return;
    }
    let coords = points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ");
    let dash = if dashed { r#" stroke-dasharray="4 3""# } else { "" };
    let _ = write!(
        svg,
        r#"<polyline fill="none" stroke="{stroke}" stroke-width="1.5"{dash} points="{coords}" />"#
    );
}

pub(crate) fn rect(svg: &mut String, x: f64, y: f64, w: f64, h: f64, fill: &str, opacity: f64) {
    let _ = write!(
        svg,
        r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{fill}" fill-opacity="{opacity}" />"#,
        w = w.max(0.0),
        h = h.max(0.0),
    );
}

pub(crate) fn text(svg: &mut String, x: f64, y: f64, anchor: &str, content: &str) {
    let _ = write!(
        svg,
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="{anchor}">{}</text>"#,
        escape_html(content)
    );
}

pub(crate) fn vertical_text(svg: &mut String, x: f64, y: f64, content: &str) {
    let _ = write!(
        svg,
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" transform="rotate(-90 {x:.2} {y:.2})">{}</text>"#,
        escape_html(content)
    );
}

/// Legend entries stacked in the top-left corner of the frame.
pub(crate) fn legend(svg: &mut String, frame: &Frame, entries: &[(&str, &str)]) {
    let x = frame.left + 10.0;
    let mut y = frame.top + 14.0;
    for (label, color) in entries {
        line(svg, (x, y - 4.0), (x + 20.0, y - 4.0), color, 1.5, false);
        text(svg, x + 26.0, y, "start", label);
        y += 16.0;
    }
}

/// Roughly `count` round tick values covering `[min, max]`.
pub(crate) fn nice_ticks(min: f64, max: f64, count: usize) -> (Vec<f64>, f64) {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return (vec![min], 0.0);
    }
    let raw = (max - min) / count.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    ((first..=last).map(|i| i as f64 * step).collect(), step)
}
