//! Simulation ledger: per-day records and cumulative value series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::position::CONTRACT_MULTIPLIER;

/// One simulation-day result.
///
/// Records are append-only: one per day for which a usable opening quote
/// was obtained. `put_pnl` is nonzero only on the rollover day that closes
/// a position; the sale fields are set only on such days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    /// Spot closing price
    pub price: f64,
    /// Ideal strike for the day: nearest multiple of 5 to 90% of spot
    pub target_strike: f64,
    /// Strike of the position actually held at end of day
    pub strike: f64,
    /// Expiry of the position actually held at end of day
    pub put_expiry: NaiveDate,
    /// Day's quote price at the target strike/expiry (informational)
    pub put_price: f64,
    /// Day's quoted implied volatility, when reported
    pub put_iv: Option<f64>,
    /// Realized option PnL from a rollover that happened this day
    pub put_pnl: f64,
    /// Close price of the rolled leg, on rollover days
    pub put_sale_price: Option<f64>,
    /// Strike of the rolled leg, on rollover days
    pub put_sale_strike: Option<f64>,
    /// Day-over-day spot PnL times the contract multiplier
    pub stock_change: f64,
    pub hedged_pnl: f64,
    pub unhedged_pnl: f64,
    pub rollover: bool,
}

/// Append-only ledger of day records plus the two derived cumulative value
/// series.
///
/// Both series are seeded at `CONTRACT_MULTIPLIER x` the first recorded
/// price and advanced by the running sum of the day PnLs. Earlier values
/// are never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub ticker: String,
    pub days: Vec<DayRecord>,
    pub hedged_value: Vec<f64>,
    pub unhedged_value: Vec<f64>,
}

impl Ledger {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            days: Vec::new(),
            hedged_value: Vec::new(),
            unhedged_value: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The most recently recorded day, if any.
    pub fn last(&self) -> Option<&DayRecord> {
        self.days.last()
    }

    /// Append a day record and advance both cumulative series.
    pub fn push(&mut self, record: DayRecord) {
        let (hedged, unhedged) = match (self.hedged_value.last(), self.unhedged_value.last()) {
            (Some(h), Some(u)) => (h + record.hedged_pnl, u + record.unhedged_pnl),
            _ => {
                let base = CONTRACT_MULTIPLIER * record.price;
                (base + record.hedged_pnl, base + record.unhedged_pnl)
            }
        };
        self.hedged_value.push(hedged);
        self.unhedged_value.push(unhedged);
        self.days.push(record);
    }

    pub fn rollover_count(&self) -> usize {
        self.days.iter().filter(|d| d.rollover).count()
    }

    /// Final values and total returns, hedged vs. unhedged. `None` when no
    /// day was recorded.
    pub fn summary(&self) -> Option<HedgeSummary> {
        let first = self.days.first()?;
        let initial = CONTRACT_MULTIPLIER * first.price;
        let final_hedged = *self.hedged_value.last()?;
        let final_unhedged = *self.unhedged_value.last()?;

        Some(HedgeSummary {
            initial_value: initial,
            final_hedged,
            final_unhedged,
            hedged_return_pct: (final_hedged - initial) / initial * 100.0,
            unhedged_return_pct: (final_unhedged - initial) / initial * 100.0,
        })
    }
}

/// Final portfolio values and total returns with and without the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HedgeSummary {
    pub initial_value: f64,
    pub final_hedged: f64,
    pub final_unhedged: f64,
    pub hedged_return_pct: f64,
    pub unhedged_return_pct: f64,
}
