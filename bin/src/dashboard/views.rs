//! HTML for the dashboard page: a sidebar form and the selected page.
//!
//! The sidebar is a single GET form, so every button re-submits the whole
//! selection. Export buttons post the same fields to the download endpoints
//! through `formaction`.

use std::fmt::Write as _;

use momentum_report::{CustomReport, ReportItem, export, format::escape_html};

use super::request::{DashboardRequest, Page};

/// What the main area shows.
#[derive(Debug)]
pub(crate) enum Content {
    Home,
    /// The pipeline stopped with a user-facing message.
    Failed(String),
    /// Rendered tearsheet page.
    Snapshot(String),
    Report(CustomReport),
}

const STYLE: &str = r#"<style>
body { margin: 0; display: flex; font-family: "Source Sans Pro", Arial, sans-serif; color: #31333f; }
.sidebar { width: 300px; min-height: 100vh; padding: 24px 16px; background: #f0f2f6; box-sizing: border-box; }
.sidebar label { display: block; margin: 12px 0 4px; font-size: 14px; }
.sidebar input[type=text], .sidebar input[type=date], .sidebar select { width: 100%; box-sizing: border-box; padding: 6px; }
.sidebar select { height: 360px; }
.sidebar button { display: block; margin: 8px 0; padding: 6px 12px; }
.sidebar .check { display: flex; gap: 6px; align-items: center; }
main { flex: 1; padding: 24px 48px; }
.error { padding: 16px; border-radius: 4px; background: #ffe6e6; color: #7d1a1a; }
.row { display: flex; gap: 24px; }
.row .col { flex: 1; min-width: 0; }
.row.full { display: block; }
.mm-plot svg { width: 100%; height: auto; }
table.dataframe { border-collapse: collapse; width: 100%; font-size: 13px; }
table.dataframe td, table.dataframe th { padding: 4px 8px; text-align: right; border-bottom: 1px solid #eee; }
</style>"#;

fn text_input(html: &mut String, label: &str, name: &str, value: &str) {
    let _ = write!(
        html,
        r#"<label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{}">"#,
        escape_html(value)
    );
}

fn date_input(html: &mut String, label: &str, name: &str, value: &str, min: &str, max: &str) {
    let _ = write!(
        html,
        r#"<label for="{name}">{label}</label><input type="date" id="{name}" name="{name}" value="{value}" min="{min}" max="{max}">"#
    );
}

fn sidebar(request: &DashboardRequest, content: &Content) -> String {
    let day = |d: chrono::NaiveDate| d.format("%Y-%m-%d").to_string();
    let mut html = String::from(r#"<aside class="sidebar"><form method="get" action="/">"#);

    // first in form order, so a clicked page button overrides it
    let _ = write!(html, r#"<input type="hidden" name="page" value="{}">"#, request.page.slug());
    html.push_str(r#"<button type="submit" name="page" value="home">Home</button>"#);

    text_input(&mut html, "Enter a stock symbol", "symbol", &request.symbol);

    html.push_str("<h2>Dates</h2>");
    date_input(&mut html, "Start date", "start", &day(request.start), &day(request.min_date), &day(request.max_date));
    date_input(&mut html, "End date", "end", &day(request.end), &day(request.start), &day(request.max_date));

    let checked = if request.include_benchmark { " checked" } else { "" };
    let _ = write!(
        html,
        r#"<label class="check"><input type="checkbox" name="include_benchmark" value="on"{checked}> Include Benchmark</label>"#
    );
    if request.include_benchmark {
        text_input(&mut html, "Enter a benchmark symbol", "benchmark", &request.benchmark);
    } else {
        let _ = write!(
            html,
            r#"<input type="hidden" name="benchmark" value="{}">"#,
            escape_html(&request.benchmark)
        );
    }

    html.push_str(r#"<button type="submit" name="page" value="snapshot">Snapshot</button>"#);
    html.push_str(r#"<button type="submit" name="page" value="custom-report">Custom Report</button>"#);

    if request.page == Page::CustomReport {
        html.push_str(
            r#"<label for="item">Select the graphs and tables you want to display:</label><select id="item" name="item" multiple>"#,
        );
        for item in ReportItem::ALL {
            let selected = if request.items.contains(&item) { " selected" } else { "" };
            let _ = write!(
                html,
                r#"<option value="{}"{selected}>{}</option>"#,
                item.slug(),
                escape_html(item.label())
            );
        }
        html.push_str(r#"</select><button type="submit">Apply</button>"#);
    } else {
        for item in &request.items {
            let _ = write!(html, r#"<input type="hidden" name="item" value="{}">"#, item.slug());
        }
    }

    match content {
        Content::Report(report) if report.is_exportable() => {
            html.push_str(r#"<button type="submit" formaction="/export/html">Export all to HTML</button>"#);
            if !report.tables().is_empty() {
                html.push_str(r#"<button type="submit" formaction="/export/csv">Export tables to CSV</button>"#);
            }
        }
        Content::Snapshot(_) => {
            html.push_str(r#"<button type="submit" formaction="/snapshot/download">Export Snapshot</button>"#);
        }
        _ => {}
    }

    html.push_str("</form></aside>");
    html
}

fn main_area(request: &DashboardRequest, content: &Content) -> String {
    let title = match request.page {
        Page::Home => "Welcome to MarketMomentum!".to_string(),
        page => page.to_string(),
    };
    let mut html = format!("<main><h1>{title}</h1>");
    if request.page == Page::Home {
        html.push_str(
            "<p>To get started, enter a stock symbol and generate your own custom report or see a key metrics snapshot</p>",
        );
    }

    match content {
        Content::Home => {}
        Content::Failed(message) => {
            let _ = write!(html, r#"<div class="error">{}</div>"#, escape_html(message));
        }
        Content::Snapshot(page) => {
            let _ = write!(
                html,
                r#"<iframe title="{}" srcdoc="{}" width="1080" height="4000" style="border: 0"></iframe>"#,
                export::SNAPSHOT_FILE_NAME,
                escape_html(page)
            );
        }
        Content::Report(report) => html.push_str(&report.to_html()),
    }

    html.push_str("</main>");
    html
}

/// The complete page.
pub(crate) fn page(request: &DashboardRequest, content: &Content) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>MarketMomentum</title>{STYLE}</head><body>{}{}</body></html>",
        sidebar(request, content),
        main_area(request, content)
    )
}
