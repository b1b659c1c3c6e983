//! Put option quote data

use serde::{Deserialize, Serialize};

/// Market quote for a single put, as returned by the option data provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PutQuote {
    /// Trade price of the put
    pub price: f64,
    /// Implied volatility, when the provider reports one. Display only.
    pub implied_vol: Option<f64>,
}

impl PutQuote {
    pub fn new(price: f64, implied_vol: Option<f64>) -> Self {
        Self { price, implied_vol }
    }
}
