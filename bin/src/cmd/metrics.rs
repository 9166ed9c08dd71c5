//! Metrics command implementation.

use anyhow::Result;
use momentum_stats::KeyMetrics;
use serde_json::json;

use super::{OutputFormat, SelectionArgs, banner, load_input};

/// Print the key performance metrics of a stock (and benchmark).
pub(crate) async fn show_metrics(args: &SelectionArgs, format: OutputFormat) -> Result<()> {
    let input = load_input(args).await?;
    let stock = KeyMetrics::calculate(&input.returns, &input.metrics);
    let benchmark = input
        .benchmark
        .as_ref()
        .map(|b| (b.symbol.as_str(), KeyMetrics::calculate(&b.returns, &input.metrics)));

    if format == OutputFormat::Json {
        let mut body = json!({ "symbol": input.symbol, "metrics": stock });
        if let Some((symbol, metrics)) = &benchmark {
            body["benchmark"] = json!({ "symbol": symbol, "metrics": metrics });
        }
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    banner("Key Performance Metrics");
    print!("{:<28} {:>12}", "Metric", input.symbol);
    if let Some((symbol, _)) = &benchmark {
        print!(" {symbol:>12}");
    }
    println!();
    println!("{}", "─".repeat(if benchmark.is_some() { 54 } else { 41 }));

    let bench_rows = benchmark.as_ref().map(|(_, m)| m.rows());
    for (i, (label, value)) in stock.rows().into_iter().enumerate() {
        print!("{label:<28} {value:>12.2}");
        if let Some(rows) = &bench_rows {
            print!(" {:>12.2}", rows[i].1);
        }
        println!();
    }
    println!();

    Ok(())
}
