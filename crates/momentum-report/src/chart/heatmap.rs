//! Year by month return heatmap.

use std::collections::BTreeMap;

use chrono::Datelike;
use momentum_traits::TimeSeries;
use serde::{Deserialize, Serialize};

use super::svg;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Red-yellow-green colour stops.
const RD_YL_GN: [(f64, (f64, f64, f64)); 11] = [
    (0.0, (165.0, 0.0, 38.0)),
    (0.1, (215.0, 48.0, 39.0)),
    (0.2, (244.0, 109.0, 67.0)),
    (0.3, (253.0, 174.0, 97.0)),
    (0.4, (254.0, 224.0, 139.0)),
    (0.5, (255.0, 255.0, 191.0)),
    (0.6, (217.0, 239.0, 139.0)),
    (0.7, (166.0, 217.0, 106.0)),
    (0.8, (102.0, 189.0, 99.0)),
    (0.9, (26.0, 152.0, 80.0)),
    (1.0, (0.0, 104.0, 55.0)),
];

const WIDTH: f64 = 1152.0;
const LEFT: f64 = 60.0;
const RIGHT: f64 = 90.0;
const TOP: f64 = 20.0;
const BOTTOM: f64 = 40.0;
const ROW_HEIGHT: f64 = 26.0;

/// Monthly returns laid out as a year × month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    /// Chart title
    pub title: String,
    /// Row labels, oldest year first
    pub years: Vec<i32>,
    /// `cells[row][month]`, `None` for months without data
    pub cells: Vec<[Option<f64>; 12]>,
    /// Value mapped to the red end of the scale
    pub zmin: f64,
    /// Value mapped to the green end of the scale
    pub zmax: f64,
}

impl Heatmap {
    /// Pivots a monthly return series into the year × month grid.
    pub fn from_monthly(title: impl Into<String>, monthly: &TimeSeries) -> Self {
        let mut grid: BTreeMap<i32, [Option<f64>; 12]> = BTreeMap::new();
        for (date, value) in monthly.iter() {
            let row = grid.entry(date.year()).or_insert([None; 12]);
            row[date.month0() as usize] = Some(value).filter(|v| v.is_finite());
        }
        Self {
            title: title.into(),
            years: grid.keys().copied().collect(),
            cells: grid.into_values().collect(),
            zmin: -0.5,
            zmax: 0.5,
        }
    }

    /// Fill colour for `value`, clamped to the scale.
    pub fn color(&self, value: f64) -> String {
        let t = ((value - self.zmin) / (self.zmax - self.zmin)).clamp(0.0, 1.0);
        let upper = RD_YL_GN
            .iter()
            .position(|(stop, _)| *stop >= t)
            .unwrap_or(RD_YL_GN.len() - 1)
            .max(1);
        let (s0, (r0, g0, b0)) = RD_YL_GN[upper - 1];
        let (s1, (r1, g1, b1)) = RD_YL_GN[upper];
        let f = if s1 > s0 { (t - s0) / (s1 - s0) } else { 0.0 };
        format!(
            "rgb({:.0},{:.0},{:.0})",
            r0 + (r1 - r0) * f,
            g0 + (g1 - g0) * f,
            b0 + (b1 - b0) * f
        )
    }

    /// Renders the grid with per-cell percentages and a colour bar.
    pub fn to_svg(&self) -> String {
        let height = TOP + BOTTOM + ROW_HEIGHT * self.years.len().max(1) as f64;
        let cell_w = (WIDTH - LEFT - RIGHT) / 12.0;
        let mut out = svg::header(WIDTH, height);

        for (idx, month) in MONTHS.iter().enumerate() {
            let x = LEFT + (idx as f64 + 0.5) * cell_w;
            svg::text(&mut out, x, height - BOTTOM + 14.0, "middle", month);
        }
        svg::text(&mut out, LEFT + 6.0 * cell_w, height - 6.0, "middle", "Month");
        svg::vertical_text(&mut out, 12.0, TOP + (height - TOP - BOTTOM) / 2.0, "Year");

        // most recent year on top
        for (row, (year, cells)) in self.years.iter().zip(&self.cells).rev().enumerate() {
            let y = TOP + row as f64 * ROW_HEIGHT;
            svg::text(&mut out, LEFT - 6.0, y + ROW_HEIGHT / 2.0 + 3.0, "end", &year.to_string());
            for (month, value) in cells.iter().enumerate() {
                let x = LEFT + month as f64 * cell_w;
                match value {
                    Some(v) => {
                        svg::rect(&mut out, x, y, cell_w, ROW_HEIGHT, &self.color(*v), 1.0);
                        svg::text(
                            &mut out,
                            x + cell_w / 2.0,
                            y + ROW_HEIGHT / 2.0 + 3.0,
                            "middle",
                            &format!("{:.2}%", v * 100.0),
                        );
                    }
                    None => svg::rect(&mut out, x, y, cell_w, ROW_HEIGHT, "#f5f5f5", 1.0),
                }
            }
        }

        // colour bar
        let bar_x = WIDTH - RIGHT + 20.0;
        let bar_h = height - TOP - BOTTOM;
        let steps = 20;
        for i in 0..steps {
            let frac = i as f64 / steps as f64;
            let value = self.zmax - (self.zmax - self.zmin) * frac;
            let y = TOP + bar_h * frac;
            svg::rect(&mut out, bar_x, y, 14.0, bar_h / steps as f64 + 0.5, &self.color(value), 1.0);
        }
        for tick in 0..5 {
            let frac = f64::from(tick) / 4.0;
            let value = self.zmax - (self.zmax - self.zmin) * frac;
            svg::text(
                &mut out,
                bar_x + 18.0,
                TOP + bar_h * frac + 3.0,
                "start",
                &format!("{:.0}%", value * 100.0),
            );
        }
        svg::text(&mut out, bar_x, TOP - 6.0, "start", "Return %");

        out.push_str(svg::footer());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use momentum_traits::Date;

    fn monthly() -> TimeSeries {
        let d = |y, m, day| Date::from_ymd_opt(y, m, day).unwrap();
        TimeSeries::new(
            None,
            vec![d(2023, 11, 30), d(2023, 12, 31), d(2024, 1, 31)],
            vec![0.1, -0.05, 0.0123],
        )
        .unwrap()
    }

    #[test]
    fn test_pivot() {
        let map = Heatmap::from_monthly("Monthly Returns Heatmap for MSFT", &monthly());
        assert_eq!(map.years, vec![2023, 2024]);
        assert_eq!(map.cells[0][10], Some(0.1));
        assert_eq!(map.cells[0][0], None);
        assert_eq!(map.cells[1][0], Some(0.0123));
    }

    #[test]
    fn test_color_scale() {
        let map = Heatmap::from_monthly("t", &monthly());
        assert_eq!(map.color(-0.5), "rgb(165,0,38)");
        assert_eq!(map.color(-2.0), "rgb(165,0,38)");
        assert_eq!(map.color(0.0), "rgb(255,255,191)");
        assert_eq!(map.color(0.5), "rgb(0,104,55)");
    }

    #[test]
    fn test_svg_cells() {
        let svg = Heatmap::from_monthly("t", &monthly()).to_svg();
        assert!(svg.contains(">1.23%</text>"));
        assert!(svg.contains(">-5.00%</text>"));
        assert!(svg.contains(">-50%</text>"));
        assert!(svg.contains(">January</text>"));
    }
}
