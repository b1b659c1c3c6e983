//! Trading-calendar helpers for strike and expiry selection

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// The expiry targeted on a given trade date: the upcoming Friday, or the
/// following Friday when the date is itself a Friday. Always 1-7 days
/// forward, never same-day.
pub fn next_friday(date: NaiveDate) -> NaiveDate {
    let offset =
        (Weekday::Fri.num_days_from_monday() + 7 - date.weekday().num_days_from_monday()) % 7;
    let offset = if offset == 0 { 7 } else { offset };
    date + Duration::days(i64::from(offset))
}

/// The strike targeted at a given spot: the nearest multiple of 5 to 90%
/// of spot. Ties round away from zero.
pub fn target_strike(spot: f64) -> f64 {
    (0.9 * spot / 5.0).round() * 5.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekdays_map_to_upcoming_friday() {
        // 2025-03-03 is a Monday, 2025-03-07 the Friday of that week
        for d in 3..=6 {
            assert_eq!(next_friday(date(2025, 3, d)), date(2025, 3, 7));
        }
    }

    #[test]
    fn test_friday_maps_to_following_friday() {
        assert_eq!(next_friday(date(2025, 3, 7)), date(2025, 3, 14));
    }

    #[test]
    fn test_weekend_maps_to_next_friday() {
        assert_eq!(next_friday(date(2025, 3, 8)), date(2025, 3, 14));
        assert_eq!(next_friday(date(2025, 3, 9)), date(2025, 3, 14));
    }

    #[test]
    fn test_expiry_is_always_a_friday_within_a_week() {
        let mut d = date(2025, 1, 1);
        for _ in 0..60 {
            let expiry = next_friday(d);
            assert_eq!(expiry.weekday(), Weekday::Fri);
            let gap = (expiry - d).num_days();
            assert!((1..=7).contains(&gap));
            d += Duration::days(1);
        }
    }

    #[test]
    fn test_target_strike_basics() {
        assert_eq!(target_strike(100.0), 90.0);
        assert_eq!(target_strike(120.0), 110.0);
        assert_eq!(target_strike(333.33), 300.0);
    }

    #[test]
    fn test_target_strike_ties_round_away_from_zero() {
        // 0.9 * 125 / 5 = 22.5 exactly
        assert_eq!(target_strike(125.0), 115.0);
    }

    #[test]
    fn test_target_strike_stays_within_band() {
        let mut spot = 10.0;
        while spot < 500.0 {
            let strike = target_strike(spot);
            assert_eq!(strike % 5.0, 0.0, "strike {} not a multiple of 5", strike);
            assert!(
                strike >= 0.9 * spot - 2.5 && strike <= 0.9 * spot + 2.5,
                "strike {} out of band for spot {}",
                strike,
                spot
            );
            spot += 0.37;
        }
    }
}
