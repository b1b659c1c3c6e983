//! Hedge simulation CLI
//!
//! Runs one fetch-simulate-export cycle and prints the hedged vs. unhedged
//! outcome.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use put_hedge::run::{run_dynamic_hedge, RunConfig};

/// Simulate a daily-rebalanced 10% OTM protective put against a long
/// equity position and export the results.
#[derive(Debug, Parser)]
#[command(name = "put-hedge-cli")]
struct Args {
    /// Ticker symbol, e.g. TSLA
    ticker: String,

    /// Window start (YYYY-MM-DD)
    start: NaiveDate,

    /// Window end (YYYY-MM-DD)
    end: NaiveDate,

    /// Output directory for the spreadsheet and chart
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = RunConfig::from_env()?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    let artifacts = run_dynamic_hedge(&config, &args.ticker, args.start, args.end)?;
    let summary = artifacts.summary;

    println!("Final portfolio values for {}:", args.ticker.to_uppercase());
    println!("  Unhedged: {:.2}", summary.final_unhedged);
    println!("  Hedged:   {:.2}", summary.final_hedged);
    println!("Total returns:");
    println!("  Unhedged: {:.2}%", summary.unhedged_return_pct);
    println!("  Hedged:   {:.2}%", summary.hedged_return_pct);
    println!("Spreadsheet: {}", artifacts.excel_path.display());
    println!("Chart:       {}", artifacts.plot_path.display());

    Ok(())
}
