//! ORATS data API client
//!
//! Fetches unadjusted daily closes and historical put quotes from the
//! ORATS datav2 REST endpoints. Requires an API token.

use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

use super::{PriceSeriesSource, PutQuoteSource};
use crate::core::{HedgeError, HedgeResult, PricePoint, PutQuote};

/// ORATS API configuration.
///
/// The token is per-client state handed in by the caller, never a
/// process-wide constant.
#[derive(Debug, Clone)]
pub struct OratsConfig {
    pub token: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OratsConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: "https://api.orats.io/datav2".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Read the token from the `ORATS_TOKEN` environment variable.
    pub fn from_env() -> HedgeResult<Self> {
        let token = std::env::var("ORATS_TOKEN")
            .map_err(|_| HedgeError::invalid_request("ORATS_TOKEN is not set"))?;
        Ok(Self::new(token))
    }
}

/// ORATS REST client
pub struct OratsClient {
    client: reqwest::blocking::Client,
    config: OratsConfig,
}

impl OratsClient {
    pub fn new(config: OratsConfig) -> HedgeResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HedgeError::network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Put trade price and IV for a strike/expiry as of a trade date.
    ///
    /// `Ok(None)` when the provider has no matching put row for the query.
    pub fn put_quote_checked(
        &self,
        ticker: &str,
        trade_date: NaiveDate,
        strike: f64,
        expiry: NaiveDate,
    ) -> HedgeResult<Option<PutQuote>> {
        let url = format!("{}/hist/strikes/options", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("token", self.config.token.clone()),
                ("ticker", ticker.to_string()),
                ("tradeDate", trade_date.format("%Y-%m-%d").to_string()),
                ("expirDate", expiry.format("%Y-%m-%d").to_string()),
                ("strike", strike.to_string()),
            ])
            .send()
            .map_err(|e| HedgeError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let payload: StrikesResponse = response
            .json()
            .map_err(|e| HedgeError::parse(format!("option quote payload: {}", e)))?;

        Ok(first_put_quote(payload))
    }
}

impl PriceSeriesSource for OratsClient {
    /// Unadjusted daily closes, ascending by date. Rows without a parsable
    /// date or close price are dropped.
    fn daily_prices(&self, ticker: &str) -> HedgeResult<Vec<PricePoint>> {
        let url = format!("{}/hist/dailies", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("token", self.config.token.as_str()), ("ticker", ticker)])
            .send()
            .map_err(|e| HedgeError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(HedgeError::no_data(format!(
                "price request for {} returned {}",
                ticker,
                response.status()
            )));
        }

        let payload: DailyHistoryResponse = response
            .json()
            .map_err(|e| HedgeError::parse(format!("daily price payload: {}", e)))?;

        Ok(parse_daily_history(payload))
    }
}

impl PutQuoteSource for OratsClient {
    fn put_quote(
        &self,
        ticker: &str,
        trade_date: NaiveDate,
        strike: f64,
        expiry: NaiveDate,
    ) -> Option<PutQuote> {
        match self.put_quote_checked(ticker, trade_date, strike, expiry) {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!(
                    "put quote {} {} strike {} exp {}: {}",
                    ticker,
                    trade_date,
                    strike,
                    expiry,
                    e
                );
                None
            }
        }
    }
}

fn parse_daily_history(payload: DailyHistoryResponse) -> Vec<PricePoint> {
    let mut series: Vec<PricePoint> = payload
        .data
        .into_iter()
        .filter_map(|row| {
            let date = NaiveDate::parse_from_str(&row.trade_date, "%Y-%m-%d").ok()?;
            Some(PricePoint::new(date, row.unadj_close?))
        })
        .collect();
    series.sort_by_key(|p| p.date);
    series
}

fn first_put_quote(payload: StrikesResponse) -> Option<PutQuote> {
    payload
        .data
        .into_iter()
        .find_map(|row| row.put_value.map(|price| PutQuote::new(price, row.iv)))
}

// ORATS API response structures

#[derive(Debug, Deserialize)]
struct DailyHistoryResponse {
    #[serde(default)]
    data: Vec<DailyRow>,
}

#[derive(Debug, Deserialize)]
struct DailyRow {
    #[serde(rename = "tradeDate")]
    trade_date: String,
    #[serde(rename = "unadjClsPx")]
    unadj_close: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct StrikesResponse {
    #[serde(default)]
    data: Vec<StrikeRow>,
}

#[derive(Debug, Deserialize)]
struct StrikeRow {
    #[serde(rename = "putValue")]
    put_value: Option<f64>,
    iv: Option<f64>,
}
