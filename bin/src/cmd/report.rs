//! Report command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use momentum_report::{CustomReport, ReportItem, export};

use super::{SelectionArgs, banner, load_input};

/// Build a custom report and write its HTML and CSV bundles into `out_dir`.
///
/// An empty item list selects every item.
pub(crate) async fn write_report(args: &SelectionArgs, items: &[ReportItem], out_dir: &Path) -> Result<()> {
    banner("Custom Report");

    let items = if items.is_empty() { ReportItem::ALL.to_vec() } else { items.to_vec() };
    let input = load_input(args).await?;
    let report = CustomReport::build(&input, &items);
    if !report.is_exportable() {
        bail!("Nothing to export: select at least one graph or table");
    }

    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let html_path = out_dir.join(export::HTML_FILE_NAME);
    tokio::fs::write(&html_path, export::html_bundle(&input.symbol, &report))
        .await
        .with_context(|| format!("writing {}", html_path.display()))?;
    println!("Graphs and tables written to {}", html_path.display());

    if !report.tables().is_empty() {
        let csv_path = out_dir.join(export::CSV_FILE_NAME);
        tokio::fs::write(&csv_path, export::csv_bundle(&report)?)
            .await
            .with_context(|| format!("writing {}", csv_path.display()))?;
        println!("Tables written to {}", csv_path.display());
    }

    println!();
    println!("{:<40} {:>8}", "Item", "Kind");
    println!("{}", "─".repeat(49));
    for (item, _) in report.graphs() {
        println!("{:<40} {:>8}", item.label(), "graph");
    }
    for (item, table) in report.tables() {
        println!("{:<40} {:>8}", item.label(), format!("{} rows", table.len()));
    }
    println!();
    Ok(())
}
