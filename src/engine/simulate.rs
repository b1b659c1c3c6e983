//! The hedge-state simulation loop
//!
//! Walks the price series in date order, deciding each day whether to open,
//! hold, or roll the put position, and attributing realized/unrealized PnL
//! into the ledger without double-counting or dropping a day.

use tracing::{debug, warn};

use super::calendar::{next_friday, target_strike};
use crate::core::{
    DayRecord, HedgeError, HedgeResult, HedgeState, Ledger, Position, PricePoint,
    CONTRACT_MULTIPLIER,
};
use crate::data::PutQuoteSource;

/// Simulate the daily-rebalanced protective put over `series`.
///
/// Quotes are fetched on demand: at most one close quote (when a rollover
/// triggers) and one open quote per day. A missing open quote skips the day
/// entirely; a missing close quote forfeits that leg's realized-PnL record
/// while the position is still cleared. The returned ledger holds one
/// record per day with a usable opening quote.
pub fn simulate<Q: PutQuoteSource>(
    ticker: &str,
    series: &[PricePoint],
    quotes: &Q,
) -> HedgeResult<Ledger> {
    if series.is_empty() {
        return Err(HedgeError::no_data(format!("no price data for {}", ticker)));
    }

    let mut ledger = Ledger::new(ticker);
    let mut state = HedgeState::NoPosition;

    for point in series {
        let spot = point.price;
        let expiry = next_friday(point.date);
        let target = target_strike(spot);

        let mut put_pnl = 0.0;
        let mut put_sale_price = None;
        let mut put_sale_strike = None;
        let mut rollover = false;

        // Rollover check: the open position no longer matches the day's
        // target strike or expiry.
        if let Some(&position) = state.position() {
            if expiry != position.expiry || target != position.strike {
                match quotes.put_quote(ticker, point.date, position.strike, position.expiry) {
                    Some(close) => {
                        put_pnl = position.realized_pnl(close.price);
                        put_sale_price = Some(close.price);
                        put_sale_strike = Some(position.strike);
                        rollover = true;
                        debug!(
                            "{} {}: rolled strike {} exp {} for {:.2}",
                            ticker, point.date, position.strike, position.expiry, put_pnl
                        );
                    }
                    None => {
                        // The leg is still cleared; its realized PnL is lost.
                        warn!(
                            "{} {}: no close quote for strike {} exp {}, realized PnL not recorded",
                            ticker, point.date, position.strike, position.expiry
                        );
                    }
                }
                state.close();
            }
        }

        // Open/hold: without a quote at the target the day is skipped and
        // contributes nothing to the ledger.
        let Some(open_quote) = quotes.put_quote(ticker, point.date, target, expiry) else {
            debug!("{} {}: no quote at strike {}, day skipped", ticker, point.date, target);
            continue;
        };

        // Against the previous recorded day, not the previous calendar day.
        let stock_change = match ledger.last() {
            Some(prev) => (spot - prev.price) * CONTRACT_MULTIPLIER,
            None => 0.0,
        };
        let hedged_pnl = stock_change + put_pnl;

        let position = match state {
            HedgeState::Open(position) => position,
            HedgeState::NoPosition => Position::new(target, expiry, open_quote.price),
        };
        state.open(position);

        ledger.push(DayRecord {
            date: point.date,
            price: spot,
            target_strike: target,
            strike: position.strike,
            put_expiry: position.expiry,
            put_price: open_quote.price,
            put_iv: open_quote.implied_vol,
            put_pnl,
            put_sale_price,
            put_sale_strike,
            stock_change,
            hedged_pnl,
            unhedged_pnl: stock_change,
            rollover,
        });
    }

    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PutQuote;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        // 2025-03-03 is a Monday
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn series(prices: &[(u32, f64)]) -> Vec<PricePoint> {
        prices.iter().map(|&(d, p)| PricePoint::new(date(d), p)).collect()
    }

    /// Quote 3.0 / IV 0.2 at any strike and expiry.
    fn constant_quotes(
        _ticker: &str,
        _date: NaiveDate,
        _strike: f64,
        _expiry: NaiveDate,
    ) -> Option<PutQuote> {
        Some(PutQuote::new(3.0, Some(0.2)))
    }

    #[test]
    fn test_empty_series_aborts() {
        let result = simulate("TEST", &[], &constant_quotes);
        assert!(matches!(result, Err(HedgeError::NoData(_))));
    }

    #[test]
    fn test_flat_week_has_no_rollovers_and_no_pnl() {
        // Mon-Thu of one week: constant spot, constant target, constant expiry
        let prices = series(&[(3, 100.0), (4, 100.0), (5, 100.0), (6, 100.0)]);
        let ledger = simulate("TEST", &prices, &constant_quotes).unwrap();

        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.rollover_count(), 0);
        for day in &ledger.days {
            assert_eq!(day.target_strike, 90.0);
            assert_eq!(day.strike, 90.0);
            assert_eq!(day.put_expiry, date(7));
            assert_eq!(day.stock_change, 0.0);
            assert_eq!(day.put_pnl, 0.0);
            assert_eq!(day.hedged_pnl, 0.0);
            assert_eq!(day.unhedged_pnl, 0.0);
            assert!(!day.rollover);
        }
        assert_eq!(ledger.hedged_value, ledger.unhedged_value);
        assert!(ledger.hedged_value.iter().all(|&v| v == 10_000.0));
    }

    #[test]
    fn test_first_value_seeds_at_100x_spot() {
        let prices = series(&[(3, 250.0), (4, 250.0)]);
        let ledger = simulate("TEST", &prices, &constant_quotes).unwrap();

        assert_eq!(ledger.hedged_value[0], 25_000.0);
        assert_eq!(ledger.unhedged_value[0], 25_000.0);
    }

    #[test]
    fn test_crossing_friday_rolls_the_expiry() {
        // Thu 2025-03-06 targets Fri 03-07; Fri 03-07 targets Fri 03-14
        let prices = series(&[(6, 100.0), (7, 100.0)]);
        let ledger = simulate("TEST", &prices, &constant_quotes).unwrap();

        assert_eq!(ledger.len(), 2);
        let friday = &ledger.days[1];
        assert!(friday.rollover);
        assert_eq!(friday.put_sale_strike, Some(90.0));
        assert_eq!(friday.put_expiry, date(14));
        // Entry and close both at 3.0: realized PnL is flat
        assert_eq!(friday.put_pnl, 0.0);
    }

    #[test]
    fn test_price_jump_rolls_the_strike() {
        let prices = series(&[(3, 100.0), (4, 100.0), (5, 120.0)]);
        let quotes = |_t: &str, _d: NaiveDate, strike: f64, _e: NaiveDate| {
            // Old 90 leg closes at 1.5; everything else quotes at 3.0
            if strike == 90.0 {
                Some(PutQuote::new(1.5, Some(0.25)))
            } else {
                Some(PutQuote::new(3.0, Some(0.2)))
            }
        };

        let ledger = simulate("TEST", &prices, &quotes).unwrap();
        assert_eq!(ledger.len(), 3);

        let jump_day = &ledger.days[2];
        assert!(jump_day.rollover);
        assert_eq!(jump_day.target_strike, 110.0);
        assert_eq!(jump_day.strike, 110.0);
        assert_eq!(jump_day.put_sale_strike, Some(90.0));
        assert_eq!(jump_day.put_sale_price, Some(1.5));
        // Entered at 1.5 (the 90-strike quote), closed at 1.5
        assert_eq!(jump_day.put_pnl, 0.0);
        assert_eq!(jump_day.stock_change, 2_000.0);
        assert_eq!(jump_day.hedged_pnl, jump_day.stock_change + jump_day.put_pnl);
    }

    #[test]
    fn test_rollover_realizes_entry_to_close_difference() {
        let prices = series(&[(3, 100.0), (4, 120.0)]);
        let quotes = |_t: &str, d: NaiveDate, strike: f64, _e: NaiveDate| {
            if strike == 90.0 && d == date(3) {
                Some(PutQuote::new(3.0, Some(0.2))) // entry
            } else if strike == 90.0 {
                Some(PutQuote::new(0.8, Some(0.3))) // close
            } else {
                Some(PutQuote::new(2.1, Some(0.2)))
            }
        };

        let ledger = simulate("TEST", &prices, &quotes).unwrap();
        let roll_day = &ledger.days[1];
        assert!(roll_day.rollover);
        assert!((roll_day.put_pnl - (0.8 - 3.0) * 100.0).abs() < 1e-9);
        assert_eq!(roll_day.hedged_pnl, roll_day.stock_change + roll_day.put_pnl);
        assert_eq!(roll_day.unhedged_pnl, roll_day.stock_change);
    }

    #[test]
    fn test_missing_open_quote_skips_the_day() {
        let prices = series(&[(3, 100.0), (4, 104.0), (5, 106.0)]);
        let quotes = |_t: &str, d: NaiveDate, _s: f64, _e: NaiveDate| {
            if d == date(4) {
                None
            } else {
                Some(PutQuote::new(3.0, Some(0.2)))
            }
        };

        let ledger = simulate("TEST", &prices, &quotes).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.days[0].date, date(3));
        assert_eq!(ledger.days[1].date, date(5));
        // Against the last recorded day (100.0), not the skipped day's 104.0
        assert_eq!(ledger.days[1].stock_change, 600.0);
    }

    #[test]
    fn test_missing_close_quote_forfeits_realized_pnl() {
        let prices = series(&[(3, 100.0), (4, 120.0)]);
        let quotes = |_t: &str, d: NaiveDate, strike: f64, _e: NaiveDate| {
            if strike == 90.0 && d == date(4) {
                None // close quote for the old leg is unavailable
            } else {
                Some(PutQuote::new(3.0, Some(0.2)))
            }
        };

        let ledger = simulate("TEST", &prices, &quotes).unwrap();
        let day = &ledger.days[1];
        // The leg is dropped silently: no realized PnL, no sale fields, no
        // rollover flag, but the new 110 position is open.
        assert!(!day.rollover);
        assert_eq!(day.put_pnl, 0.0);
        assert_eq!(day.put_sale_strike, None);
        assert_eq!(day.put_sale_price, None);
        assert_eq!(day.strike, 110.0);
    }

    #[test]
    fn test_missing_first_day_quote_defers_the_baseline() {
        let prices = series(&[(3, 100.0), (4, 105.0)]);
        let quotes = |_t: &str, d: NaiveDate, _s: f64, _e: NaiveDate| {
            if d == date(3) {
                None
            } else {
                Some(PutQuote::new(3.0, Some(0.2)))
            }
        };

        let ledger = simulate("TEST", &prices, &quotes).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.days[0].date, date(4));
        assert_eq!(ledger.days[0].stock_change, 0.0);
        assert_eq!(ledger.hedged_value[0], 10_500.0);
    }

    #[test]
    fn test_hold_day_keeps_position_but_records_target_quote() {
        // Spot moves but not enough to change the target strike
        let prices = series(&[(3, 100.0), (4, 101.0)]);
        let quotes = |_t: &str, d: NaiveDate, _s: f64, _e: NaiveDate| {
            if d == date(3) {
                Some(PutQuote::new(3.0, Some(0.2)))
            } else {
                Some(PutQuote::new(2.6, Some(0.18)))
            }
        };

        let ledger = simulate("TEST", &prices, &quotes).unwrap();
        let hold_day = &ledger.days[1];
        assert!(!hold_day.rollover);
        assert_eq!(hold_day.strike, 90.0);
        // The day's quote is informational; the position's entry stays 3.0
        assert_eq!(hold_day.put_price, 2.6);
        assert_eq!(hold_day.put_iv, Some(0.18));
    }

    #[test]
    fn test_per_day_pnl_identities_hold() {
        let prices = series(&[(3, 100.0), (4, 97.0), (5, 120.0), (6, 118.0), (7, 119.0)]);
        let ledger = simulate("TEST", &prices, &constant_quotes).unwrap();

        for day in &ledger.days {
            assert_eq!(day.hedged_pnl, day.stock_change + day.put_pnl);
            assert_eq!(day.unhedged_pnl, day.stock_change);
            assert_eq!(day.rollover, day.put_sale_strike.is_some());
        }
        for i in 1..ledger.len() {
            assert_eq!(
                ledger.hedged_value[i],
                ledger.hedged_value[i - 1] + ledger.days[i].hedged_pnl
            );
            assert_eq!(
                ledger.unhedged_value[i],
                ledger.unhedged_value[i - 1] + ledger.days[i].unhedged_pnl
            );
        }
    }

    #[test]
    fn test_identical_inputs_produce_identical_ledgers() {
        let prices = series(&[(3, 100.0), (4, 97.0), (5, 120.0), (6, 118.0)]);
        let first = simulate("TEST", &prices, &constant_quotes).unwrap();
        let second = simulate("TEST", &prices, &constant_quotes).unwrap();
        assert_eq!(first, second);
    }
}
