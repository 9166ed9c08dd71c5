//! Snapshot command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use momentum_report::Tearsheet;

use super::{SelectionArgs, banner, load_input};

/// Write the key-metrics tearsheet to `output`.
pub(crate) async fn write_snapshot(args: &SelectionArgs, output: &Path) -> Result<()> {
    banner("Snapshot");

    let input = load_input(args).await?;
    let sheet = Tearsheet::build(&input)?;
    tokio::fs::write(output, sheet.to_html())
        .await
        .with_context(|| format!("writing {}", output.display()))?;

    println!("{} written to {}", sheet.title(), output.display());
    println!(
        "  EOY rows: {}, worst drawdowns listed: {}",
        sheet.eoy().len(),
        sheet.drawdowns().len()
    );
    println!();
    Ok(())
}
