//! Custom reports: the user's selection rendered into a two-column grid.

use tracing::{debug, info};

use crate::{
    chart::{Chart, graphs},
    format::escape_html,
    input::ReportInput,
    item::ReportItem,
    table::Table,
    tables,
};

/// One row of the page layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutRow {
    /// An item spanning both columns.
    FullWidth(ReportItem),
    /// Two column slots, filled left to right.
    Columns([Option<ReportItem>; 2]),
}

/// Places items into rows.
///
/// Every item except the full-width heatmap goes into the next free column
/// slot; a new two-column row opens only when the free column index wraps
/// to 0. The heatmap is appended as its own row and leaves the free column
/// index untouched, so an item following it may still fill the open slot of
/// the row above it.
pub fn layout(items: &[ReportItem]) -> Vec<LayoutRow> {
    let mut rows = Vec::new();
    let mut open_row = None;
    let mut free_column = 0;

    for item in items {
        if item.full_width() {
            rows.push(LayoutRow::FullWidth(*item));
            continue;
        }
        if free_column == 0 {
            rows.push(LayoutRow::Columns([None, None]));
            open_row = Some(rows.len() - 1);
        }
        if let Some(LayoutRow::Columns(slots)) = open_row.and_then(|idx| rows.get_mut(idx)) {
            slots[free_column] = Some(*item);
        }
        free_column = (free_column + 1) % 2;
    }
    rows
}

/// A rendered custom report.
#[derive(Debug, Clone)]
pub struct CustomReport {
    symbol: String,
    rows: Vec<LayoutRow>,
    graphs: Vec<(ReportItem, Chart)>,
    tables: Vec<(ReportItem, Table)>,
}

impl CustomReport {
    /// Renders each selected item in order. Repeated items are rendered once.
    pub fn build(input: &ReportInput, items: &[ReportItem]) -> Self {
        let mut selected: Vec<ReportItem> = Vec::with_capacity(items.len());
        for item in items {
            if !selected.contains(item) {
                selected.push(*item);
            }
        }

        let mut graphs = Vec::new();
        let mut tables = Vec::new();
        for item in &selected {
            if let Some(chart) = graphs::build(*item, input) {
                graphs.push((*item, chart));
            } else if let Some(table) = tables::build(*item, input) {
                tables.push((*item, table));
            }
            debug!(item = item.slug(), "Rendered report item");
        }

        info!(
            symbol = %input.symbol,
            graphs = graphs.len(),
            tables = tables.len(),
            "Built custom report"
        );

        Self {
            symbol: input.symbol.clone(),
            rows: layout(&selected),
            graphs,
            tables,
        }
    }

    /// Ticker the report was built for.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Page layout.
    pub fn rows(&self) -> &[LayoutRow] {
        &self.rows
    }

    /// Rendered graphs in selection order.
    pub fn graphs(&self) -> &[(ReportItem, Chart)] {
        &self.graphs
    }

    /// Rendered tables in selection order.
    pub fn tables(&self) -> &[(ReportItem, Table)] {
        &self.tables
    }

    /// Whether anything was rendered, which is when export is offered.
    pub fn is_exportable(&self) -> bool {
        !self.graphs.is_empty() || !self.tables.is_empty()
    }

    fn item_html(&self, item: ReportItem) -> String {
        if let Some((_, chart)) = self.graphs.iter().find(|(i, _)| *i == item) {
            return chart.to_html();
        }
        if let Some((_, table)) = self.tables.iter().find(|(i, _)| *i == item) {
            return format!(
                "<h6><b>{}</b></h6>\n{}",
                escape_html(&table.title),
                table.to_html()
            );
        }
        String::new()
    }

    /// Renders the grid as HTML for the dashboard page.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for row in &self.rows {
            match row {
                LayoutRow::FullWidth(item) => {
                    html.push_str(&format!("<div class=\"row full\">{}</div>\n", self.item_html(*item)));
                }
                LayoutRow::Columns(slots) => {
                    html.push_str("<div class=\"row\">");
                    for slot in slots {
                        let inner = slot.map(|item| self.item_html(item)).unwrap_or_default();
                        html.push_str(&format!("<div class=\"col\">{inner}</div>"));
                    }
                    html.push_str("</div>\n");
                }
            }
        }
        html
    }
}
