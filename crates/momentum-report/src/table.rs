//! Formatted tables and their HTML and CSV renderings.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{error::Result, format::escape_html};

/// A titled table of pre-formatted cells.
///
/// Cells hold exactly the text shown on screen, so the HTML and CSV
/// renderings agree with the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Heading shown above the table
    pub title: String,
    /// Column headers
    pub columns: Vec<String>,
    /// Rows of cells, each as long as `columns`
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given headers.
    pub fn new(title: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of one column, by header.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Builds a string-typed DataFrame. Empty cells become nulls.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values: Vec<Option<String>> = self
                    .rows
                    .iter()
                    .map(|row| Some(row[idx].clone()).filter(|cell| !cell.is_empty()))
                    .collect();
                Column::new(name.as_str().into(), values)
            })
            .collect();
        Ok(DataFrame::new(columns)?)
    }

    /// Serializes the table as CSV with a header line.
    pub fn to_csv(&self) -> Result<String> {
        let mut df = self.to_frame()?;
        let mut buf = Vec::new();
        CsvWriter::new(&mut buf)
            .include_header(true)
            .finish(&mut df)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Renders the table body as an HTML `<table>`.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<table border=\"0\" class=\"dataframe\">\n  <thead>\n    <tr style=\"text-align: right;\">\n");
        for column in &self.columns {
            html.push_str(&format!("      <th>{}</th>\n", escape_html(column)));
        }
        html.push_str("    </tr>\n  </thead>\n  <tbody>\n");
        for row in &self.rows {
            html.push_str("    <tr>\n");
            for cell in row {
                html.push_str(&format!("      <td>{}</td>\n", escape_html(cell)));
            }
            html.push_str("    </tr>\n");
        }
        html.push_str("  </tbody>\n</table>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(
            "Daily Returns Table (%)",
            vec!["Date".to_string(), "MSFT".to_string(), "SPY".to_string()],
        );
        table.push_row(vec!["01/02/2024".into(), "1.25".into(), "-0.50".into()]);
        table.push_row(vec!["01/03/2024".into(), "-2.00".into()]);
        table
    }

    #[test]
    fn test_push_row_pads() {
        let table = sample();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1], vec!["01/03/2024", "-2.00", ""]);
        assert_eq!(table.column("SPY").unwrap(), vec!["-0.50", ""]);
        assert!(table.column("QQQ").is_none());
    }

    #[test]
    fn test_frame_shape() {
        let df = sample().to_frame().unwrap();
        assert_eq!(df.shape(), (2, 3));
        assert!(df.column("MSFT").is_ok());
        assert_eq!(df.column("SPY").unwrap().null_count(), 1);
    }

    #[test]
    fn test_csv_keeps_cell_text() {
        let csv = sample().to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Date,MSFT,SPY");
        assert_eq!(lines[1], "01/02/2024,1.25,-0.50");
        assert_eq!(lines[2], "01/03/2024,-2.00,");
    }

    #[test]
    fn test_html_contains_cells() {
        let html = sample().to_html();
        assert!(html.starts_with("<table border=\"0\" class=\"dataframe\">"));
        assert!(html.contains("<th>MSFT</th>"));
        assert!(html.contains("<td>-0.50</td>"));
        assert_eq!(html.matches("<tr>").count(), 2);
    }
}
