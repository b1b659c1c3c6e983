//! Core data types for the hedge simulator
//!
//! Defines fundamental types:
//! - PricePoint: one daily closing price
//! - PutQuote: provider-sourced put price and IV
//! - Position / HedgeState: the open hedge leg and its state machine
//! - DayRecord / Ledger: per-day results and cumulative value series

pub mod error;
pub mod ledger;
pub mod position;
pub mod price;
pub mod quote;

pub use error::*;
pub use ledger::*;
pub use position::*;
pub use price::*;
pub use quote::*;
