//! Drawdowns command implementation.

use anyhow::Result;
use momentum_stats::worst_drawdown_periods;

use super::{OutputFormat, SelectionArgs, banner, load_input};

/// Print the worst drawdown periods of a stock.
pub(crate) async fn show_drawdowns(args: &SelectionArgs, top: usize, format: OutputFormat) -> Result<()> {
    let input = load_input(args).await?;
    let periods = worst_drawdown_periods(&input.returns, top);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&periods)?);
        return Ok(());
    }

    banner(&format!("Worst {top} Drawdowns"));

    if periods.is_empty() {
        println!("No drawdowns: {} never traded below a previous high.", input.symbol);
        println!();
        return Ok(());
    }

    println!(
        "{:<12} {:<12} {:<12} {:>6} {:>12} {:>12}",
        "Start", "Valley", "End", "Days", "Drawdown %", "99% Max DD %"
    );
    println!("{}", "─".repeat(71));
    for period in &periods {
        println!(
            "{:<12} {:<12} {:<12} {:>6} {:>12.2} {:>12.2}",
            period.start.to_string(),
            period.valley.to_string(),
            period.end.to_string(),
            period.days,
            period.max_drawdown * 100.0,
            period.max_drawdown_99 * 100.0
        );
    }
    println!();

    Ok(())
}
