//! Daily price series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily closing price for the underlying.
///
/// A series is ordered ascending by date with one point per trading day and
/// no duplicate dates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Slice an ascending series down to the inclusive `[start, end]` window.
pub fn window(series: &[PricePoint], start: NaiveDate, end: NaiveDate) -> Vec<PricePoint> {
    series
        .iter()
        .copied()
        .filter(|p| p.date >= start && p.date <= end)
        .collect()
}
