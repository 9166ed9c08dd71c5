//! Cell and label formatting shared by tables and charts.

use momentum_traits::Date;

/// Rounds to two decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a number as table cell text: two decimals, no negative zero.
///
/// Non-finite values produce an empty cell.
///
/// ```
/// use momentum_report::format::cell;
///
/// assert_eq!(cell(1.234), "1.23");
/// assert_eq!(cell(-0.001), "0.00");
/// assert_eq!(cell(f64::NAN), "");
/// ```
pub fn cell(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let rounded = round2(value);
    // -0.0 prints as "-0.00"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.2}")
}

/// Formats a date as `mm/dd/yyyy`.
pub fn date_cell(date: Date) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Formats a fraction as a whole percentage for axis ticks, e.g. `25%`.
pub fn percent_tick(value: f64) -> String {
    let pct = value * 100.0;
    if pct.abs() >= 1000.0 {
        format!("{:.0}K%", pct / 1000.0)
    } else {
        format!("{pct:.0}%")
    }
}

/// Formats an axis tick value with a precision suited to the tick step.
pub fn number_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10()).ceil() as usize
    };
    let text = format!("{value:.decimals$}");
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

/// Escapes text for inclusion in HTML or SVG.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
