//! Hedge simulation engine
//!
//! The day-by-day protective-put simulation: strike and expiry selection,
//! rollover decisions, and PnL attribution into the hedged and unhedged
//! value series.

pub mod calendar;
pub mod simulate;

pub use calendar::{next_friday, target_strike};
pub use simulate::simulate;
