//! Downloadable bundles of a custom report.

use tracing::debug;

use crate::{custom::CustomReport, error::Result, format::escape_html};

/// File name of the HTML bundle.
pub const HTML_FILE_NAME: &str = "tables_and_graphs.html";

/// File name of the CSV bundle.
pub const CSV_FILE_NAME: &str = "tables.csv";

/// File name of the snapshot tearsheet.
pub const SNAPSHOT_FILE_NAME: &str = "snapshot.html";

const EXPORT_CSS: &str = r#"
<style>
.container {
    display: flex;
    align-items: flex-start;
}
.graphs {
    width: 66.66%;
}
.tables {
    width: 33.33%;
}
.table table {
    border-collapse: collapse;
    width: 100%;
}
.table table td, .table table th {
    border: none;
    padding: 10px;
    text-align: left;
}
.table table th {
    white-space: nowrap;
}
</style>
"#;

/// Standalone HTML page with every graph (two thirds of the width) next to
/// every table (one third).
pub fn html_bundle(symbol: &str, report: &CustomReport) -> String {
    let graphs: String = report
        .graphs()
        .iter()
        .map(|(_, chart)| format!("<div class=\"graph\">{}</div>", chart.to_html()))
        .collect();
    let tables: String = report
        .tables()
        .iter()
        .map(|(item, table)| {
            format!(
                "<div class=\"table\"><h2>{}</h2>{}</div>",
                escape_html(item.label()),
                table.to_html()
            )
        })
        .collect();

    debug!(symbol, graphs = report.graphs().len(), tables = report.tables().len(), "Exporting HTML bundle");
    format!(
        "{EXPORT_CSS}<h1>{} Custom Report</h1><div class=\"container\"><div class=\"graphs\">{graphs}</div><div class=\"tables\">{tables}</div></div>",
        escape_html(symbol)
    )
}

/// Every table as CSV, separated by a blank line.
pub fn csv_bundle(report: &CustomReport) -> Result<String> {
    let mut parts = Vec::with_capacity(report.tables().len());
    for (_, table) in report.tables() {
        parts.push(table.to_csv()?.trim_end().to_string());
    }
    debug!(tables = parts.len(), "Exporting CSV bundle");

    let mut csv = parts.join("\n\n");
    if !csv.is_empty() {
        csv.push('\n');
    }
    Ok(csv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{input::ReportInput, item::ReportItem};
    use momentum_traits::{Date, TimeSeries};

    fn report(items: &[ReportItem]) -> CustomReport {
        let d = |m, day| Date::from_ymd_opt(2024, m, day).unwrap();
        let returns = TimeSeries::new(
            None,
            vec![d(1, 2), d(1, 3), d(2, 1)],
            vec![0.0125, -0.02, 0.005],
        )
        .unwrap();
        let input = ReportInput::new("MSFT", returns).unwrap();
        CustomReport::build(&input, items)
    }

    #[test]
    fn test_html_bundle_layout() {
        let report = report(&[ReportItem::EarningsGraph, ReportItem::DailyReturnsTable]);
        let html = html_bundle("MSFT", &report);
        assert!(html.trim_start().starts_with("<style>"));
        assert!(html.contains("<h1>MSFT Custom Report</h1>"));
        assert!(html.contains("<div class=\"graphs\"><div class=\"graph\">"));
        assert!(html.contains("<h2>Daily Returns Table (%)</h2>"));
        assert!(html.contains("width: 66.66%"));
    }

    #[test]
    fn test_csv_bundle_matches_table_cells() {
        let report = report(&[ReportItem::DailyReturnsTable, ReportItem::MonthlyReturnsTable]);
        let csv = csv_bundle(&report).unwrap();
        let blocks: Vec<&str> = csv.trim_end().split("\n\n").collect();
        assert_eq!(blocks.len(), 2);

        let table = &report.tables()[0].1;
        let lines: Vec<&str> = blocks[0].lines().collect();
        assert_eq!(lines[0], table.columns.join(","));
        for (line, row) in lines[1..].iter().zip(&table.rows) {
            assert_eq!(*line, row.join(","));
        }
        assert_eq!(lines[1], "01/02/2024,1.25");
    }

    #[test]
    fn test_html_bundle_matches_table_cells() {
        let report = report(&[ReportItem::DailyReturnsTable, ReportItem::MonthlyReturnsTable]);
        let html = html_bundle("MSFT", &report);

        assert_eq!(report.tables().len(), 2);
        for (_, table) in report.tables() {
            for column in &table.columns {
                assert!(html.contains(&format!("<th>{}</th>", escape_html(column))), "missing header {column}");
            }
            for row in &table.rows {
                for cell in row {
                    assert!(html.contains(&format!("<td>{}</td>", escape_html(cell))), "missing cell {cell}");
                }
            }
        }
        assert!(html.contains("<td>01/02/2024</td>"));
        assert!(html.contains("<td>1.25</td>"));
    }

    #[test]
    fn test_csv_bundle_without_tables() {
        let report = report(&[ReportItem::EarningsGraph]);
        assert_eq!(csv_bundle(&report).unwrap(), "");
    }
}
