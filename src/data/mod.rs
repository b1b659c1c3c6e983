//! Data fetching and storage
//!
//! Handles:
//! - ORATS data API for daily closes and historical put quotes
//! - Local caching of price series

pub mod cache;
pub mod orats;

pub use cache::*;
pub use orats::*;

use chrono::NaiveDate;

use crate::core::{HedgeResult, PricePoint, PutQuote};

/// Source of ordered daily closing prices for a ticker.
pub trait PriceSeriesSource {
    /// Full ascending daily price history. An empty series is a run-level
    /// abort condition for the caller, never a valid zero-row run.
    fn daily_prices(&self, ticker: &str) -> HedgeResult<Vec<PricePoint>>;
}

impl<S: PriceSeriesSource + ?Sized> PriceSeriesSource for &S {
    fn daily_prices(&self, ticker: &str) -> HedgeResult<Vec<PricePoint>> {
        (**self).daily_prices(ticker)
    }
}

/// Source of historical put quotes for a ticker/date/strike/expiry.
///
/// Implementations degrade transport and parse failures to `None`; the
/// engine treats a miss as a skipped day (open leg) or a forfeited
/// realized-PnL record (close leg), never as a run abort.
pub trait PutQuoteSource {
    fn put_quote(
        &self,
        ticker: &str,
        trade_date: NaiveDate,
        strike: f64,
        expiry: NaiveDate,
    ) -> Option<PutQuote>;
}

impl<F> PutQuoteSource for F
where
    F: Fn(&str, NaiveDate, f64, NaiveDate) -> Option<PutQuote>,
{
    fn put_quote(
        &self,
        ticker: &str,
        trade_date: NaiveDate,
        strike: f64,
        expiry: NaiveDate,
    ) -> Option<PutQuote> {
        self(ticker, trade_date, strike, expiry)
    }
}
