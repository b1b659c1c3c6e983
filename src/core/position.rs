//! Open hedge position and the per-run state machine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Contract multiplier for US equity options.
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// The currently open short-dated OTM put.
///
/// Exists from the day it is opened until it is rolled or the series ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Strike price, a multiple of 5
    pub strike: f64,
    /// Expiration date, always a Friday
    pub expiry: NaiveDate,
    /// Price paid to open
    pub entry_price: f64,
}

impl Position {
    pub fn new(strike: f64, expiry: NaiveDate, entry_price: f64) -> Self {
        Self {
            strike,
            expiry,
            entry_price,
        }
    }

    /// Realized PnL of closing this position at `close_price`, per contract.
    pub fn realized_pnl(&self, close_price: f64) -> f64 {
        (close_price - self.entry_price) * CONTRACT_MULTIPLIER
    }
}

/// Hedge state for one simulation run: at most one position is open at any
/// time, and it is closed only transiently during a roll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HedgeState {
    #[default]
    NoPosition,
    Open(Position),
}

impl HedgeState {
    pub fn position(&self) -> Option<&Position> {
        match self {
            HedgeState::Open(pos) => Some(pos),
            HedgeState::NoPosition => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, HedgeState::Open(_))
    }

    /// Open a position. The previous position, if any, must have been
    /// closed first.
    pub fn open(&mut self, position: Position) {
        *self = HedgeState::Open(position);
    }

    /// Close the open position, if any.
    pub fn close(&mut self) {
        *self = HedgeState::NoPosition;
    }
}
