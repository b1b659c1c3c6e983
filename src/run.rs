//! End-to-end run driver
//!
//! Fetches daily prices, slices the requested window, runs the simulation,
//! and writes the spreadsheet and chart artifacts.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::core::{window, HedgeError, HedgeResult, HedgeSummary};
use crate::data::{CacheConfig, CachedPriceSource, OratsClient, OratsConfig, PriceSeriesSource};
use crate::engine::simulate;
use crate::report::{render_value_chart, write_ledger_workbook};

/// Configuration for a simulation run: provider credentials, price cache,
/// and where artifacts land.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub orats: OratsConfig,
    pub cache: CacheConfig,
    pub output_dir: PathBuf,
}

impl RunConfig {
    /// Build from the environment: `ORATS_TOKEN` (required) and
    /// `HEDGE_OUTPUT_DIR` (defaults to `excel_exports`).
    pub fn from_env() -> HedgeResult<Self> {
        let orats = OratsConfig::from_env()?;
        let output_dir = std::env::var("HEDGE_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("excel_exports"));

        Ok(Self {
            orats,
            cache: CacheConfig::default(),
            output_dir,
        })
    }
}

/// Locations of the written artifacts plus the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct HedgeArtifacts {
    pub excel_path: PathBuf,
    pub plot_path: PathBuf,
    pub summary: HedgeSummary,
}

/// Simulate `ticker` over the inclusive `[start, end]` window and write
/// both report artifacts.
///
/// Aborts with `NoData` when the provider returns no prices, the window
/// holds no trading days, or no day yields a usable put quote.
pub fn run_dynamic_hedge(
    config: &RunConfig,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> HedgeResult<HedgeArtifacts> {
    let ticker = ticker.to_uppercase();
    info!("running dynamic hedge for {} from {} to {}", ticker, start, end);

    let client = OratsClient::new(config.orats.clone())?;
    let source = CachedPriceSource::new(config.cache.clone(), &client)?;

    let prices = source.daily_prices(&ticker)?;
    if prices.is_empty() {
        return Err(HedgeError::no_data(format!("no price data for {}", ticker)));
    }

    let windowed = window(&prices, start, end);
    if windowed.is_empty() {
        return Err(HedgeError::no_data(format!(
            "no trading days for {} between {} and {}",
            ticker, start, end
        )));
    }

    let ledger = simulate(&ticker, &windowed, &client)?;
    if ledger.is_empty() {
        return Err(HedgeError::no_data(format!(
            "no usable put quotes for {} in the requested window",
            ticker
        )));
    }

    std::fs::create_dir_all(&config.output_dir)?;
    let excel_path = config
        .output_dir
        .join(format!("{}_dynamic_hedge_output.xlsx", ticker));
    let plot_path = config
        .output_dir
        .join(format!("{}_dynamic_hedge_plot.png", ticker));

    write_ledger_workbook(&ledger, &excel_path)?;
    render_value_chart(&ledger, &plot_path)?;

    let summary = ledger
        .summary()
        .ok_or_else(|| HedgeError::no_data("ledger recorded no days"))?;

    info!(
        "{}: {} days, {} rollovers, hedged {:.2} ({:+.2}%), unhedged {:.2} ({:+.2}%)",
        ticker,
        ledger.len(),
        ledger.rollover_count(),
        summary.final_hedged,
        summary.hedged_return_pct,
        summary.final_unhedged,
        summary.unhedged_return_pct
    );

    Ok(HedgeArtifacts {
        excel_path,
        plot_path,
        summary,
    })
}
