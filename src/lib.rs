//! # Put Hedge - Dynamic Protective-Put Hedge Simulator
//!
//! Simulates a daily-rebalanced protective-put hedge against a long equity
//! position over a historical date range and reports performance against the
//! same position left unhedged.
//!
//! ## Overview
//!
//! Each trading day the simulator targets a put struck at the nearest
//! multiple of 5 to 90% of spot, expiring the upcoming Friday. When the
//! target strike or expiry drifts away from the open position, the old put
//! is closed (realizing its PnL) and a new one is opened the same day. Two
//! cumulative portfolio value series are accumulated in parallel: one with
//! the put overlay, one without.
//!
//! ## Key Components
//!
//! - **Data Fetching**: ORATS data API for daily closes and put quotes,
//!   with a local JSON price cache
//! - **Engine**: the day-by-day hedge state machine, rollover decisions,
//!   and PnL attribution
//! - **Report**: spreadsheet export with rollover-row highlighting and a
//!   dual-axis value/IV chart
//! - **Server**: HTTP endpoint wrapping a full fetch-simulate-export run
//!
//! ## Usage
//!
//! ```rust,no_run
//! use put_hedge::prelude::*;
//! use chrono::NaiveDate;
//!
//! let config = RunConfig::from_env().unwrap();
//! let artifacts = run_dynamic_hedge(
//!     &config,
//!     "TSLA",
//!     NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
//! )
//! .unwrap();
//!
//! println!("hedged return: {:.2}%", artifacts.summary.hedged_return_pct);
//! ```
//!
//! ## What This Simulator Does NOT Do
//!
//! - Trade in real time
//! - Model transaction costs or margin
//! - Price options (all prices and IVs come from the data provider)

pub mod core;
pub mod data;
pub mod engine;
pub mod report;
pub mod run;
pub mod server;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        DayRecord, HedgeError, HedgeResult, HedgeState, HedgeSummary, Ledger, Position,
        PricePoint, PutQuote, CONTRACT_MULTIPLIER,
    };

    // Data providers
    pub use crate::data::{
        CacheConfig, CachedPriceSource, OratsClient, OratsConfig, PriceCache, PriceSeriesSource,
        PutQuoteSource,
    };

    // Engine
    pub use crate::engine::{next_friday, simulate, target_strike};

    // Report artifacts
    pub use crate::report::{render_value_chart, write_ledger_workbook};

    // End-to-end driver
    pub use crate::run::{run_dynamic_hedge, HedgeArtifacts, RunConfig};
}

// Re-export main types at crate root
pub use crate::core::{HedgeError, HedgeResult, Ledger};
pub use crate::run::{run_dynamic_hedge, RunConfig};
