//! MarketMomentum CLI binary.
//!
//! Serves the web dashboard and runs the same reports offline.

mod cmd;
mod config;
mod dashboard;
mod data;
mod pipeline;

use std::{path::PathBuf, process};

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::{OutputFormat, SelectionArgs};
use data::Provider;
use momentum_report::ReportItem;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "momentum")]
#[command(about = "Stock performance dashboard: returns, drawdowns and risk ratios", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web dashboard
    Serve {
        /// Address to bind (overrides MOMENTUM_BIND)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides MOMENTUM_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Market-data provider (overrides MOMENTUM_PROVIDER)
        #[arg(long, value_enum)]
        provider: Option<Provider>,
    },

    /// Write the key-metrics snapshot page
    Snapshot {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output file
        #[arg(short, long, default_value = "snapshot.html")]
        output: PathBuf,
    },

    /// Write a custom report as HTML and CSV
    Report {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Items to include, by slug or label (defaults to all)
        #[arg(short, long, value_delimiter = ',', value_parser = parse_item)]
        items: Vec<ReportItem>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Show key performance metrics
    Metrics {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output format (text or json)
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the worst drawdown periods
    Drawdowns {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Number of periods to show
        #[arg(short = 'n', long, default_value = "10")]
        top: usize,

        /// Output format (text or json)
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

fn parse_item(name: &str) -> Result<ReportItem, String> {
    ReportItem::from_slug(name).ok_or_else(|| format!("unknown report item: {name}"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            port,
            provider,
        } => {
            cmd::serve::serve(bind, port, provider).await?;
        }
        Commands::Snapshot { selection, output } => {
            cmd::snapshot::write_snapshot(&selection, &output).await?;
        }
        Commands::Report {
            selection,
            items,
            out_dir,
        } => {
            cmd::report::write_report(&selection, &items, &out_dir).await?;
        }
        Commands::Metrics { selection, format } => {
            cmd::metrics::show_metrics(&selection, format).await?;
        }
        Commands::Drawdowns {
            selection,
            top,
            format,
        } => {
            cmd::drawdowns::show_drawdowns(&selection, top, format).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_items() {
        let cli = Cli::try_parse_from([
            "momentum",
            "report",
            "AAPL",
            "--items",
            "metrics-table,earnings-graph",
            "--benchmark",
            "SPY",
        ])
        .unwrap();
        match cli.command {
            Commands::Report {
                selection, items, ..
            } => {
                assert_eq!(selection.symbol, "AAPL");
                assert_eq!(selection.benchmark.as_deref(), Some("SPY"));
                assert_eq!(items, vec![ReportItem::MetricsTable, ReportItem::EarningsGraph]);
            }
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn test_parse_unknown_item_fails() {
        let result = Cli::try_parse_from(["momentum", "report", "AAPL", "--items", "pie-chart"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["momentum", "serve", "--port", "9000", "--provider", "fmp"]).unwrap();
        match cli.command {
            Commands::Serve { port, provider, .. } => {
                assert_eq!(port, Some(9000));
                assert_eq!(provider, Some(Provider::Fmp));
            }
            _ => panic!("expected serve command"),
        }
    }
}
