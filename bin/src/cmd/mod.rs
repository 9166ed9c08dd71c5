//! CLI subcommand modules.
//!
//! This module contains the implementations for all momentum CLI
//! subcommands, plus the selection arguments the offline commands share.

pub(crate) mod drawdowns;
pub(crate) mod metrics;
pub(crate) mod report;
pub(crate) mod serve;
pub(crate) mod snapshot;

use anyhow::Result;
use chrono::Local;
use clap::{Args, ValueEnum};
use momentum_report::ReportInput;
use momentum_traits::DateRange;

use crate::{
    config::DashboardConfig,
    data::{self, Provider},
    pipeline::{self, ReturnsCache, Selection},
};

/// Ticker, date range and benchmark of an offline command.
#[derive(Debug, Clone, Args)]
pub(crate) struct SelectionArgs {
    /// Ticker symbol
    pub(crate) symbol: String,

    /// Start date (YYYY-MM-DD, defaults to the configured lookback)
    #[arg(long)]
    pub(crate) start: Option<String>,

    /// End date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub(crate) end: Option<String>,

    /// Benchmark ticker to compare against
    #[arg(short, long)]
    pub(crate) benchmark: Option<String>,

    /// Market-data provider (defaults to MOMENTUM_PROVIDER or yahoo)
    #[arg(long, value_enum)]
    pub(crate) provider: Option<Provider>,
}

/// Output format of the tabular commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

impl SelectionArgs {
    /// The pipeline input for these arguments, with defaults from `config`.
    pub(crate) fn selection(&self, config: &DashboardConfig) -> Result<Selection> {
        let today = Local::now().date_naive();
        let start = match &self.start {
            Some(s) => data::parse_date(s)?,
            None => config.default_start(today),
        };
        let end = match &self.end {
            Some(s) => data::parse_date(s)?,
            None => today,
        };

        Ok(Selection {
            symbol: self.symbol.trim().to_string(),
            range: DateRange::new(start, end)?,
            benchmark: self.benchmark.clone(),
        })
    }
}

/// Download, slice and validate the returns named by `args`.
pub(crate) async fn load_input(args: &SelectionArgs) -> Result<ReportInput> {
    let config = DashboardConfig::from_env();
    let selection = args.selection(&config)?;
    let source = data::returns_source(args.provider.unwrap_or(config.provider))?;

    println!(
        "Fetching returns for {} from {} to {}...",
        selection.symbol,
        selection.range.start(),
        selection.range.end()
    );
    let input = pipeline::load(source.as_ref(), &ReturnsCache::new(), &selection).await?;
    println!(
        "  {} daily returns ({} to {})",
        input.returns.len(),
        input.returns.first_date().map(|d| d.to_string()).unwrap_or_default(),
        input.returns.last_date().map(|d| d.to_string()).unwrap_or_default()
    );
    println!();
    Ok(input)
}

/// Print a boxed section banner.
pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}
