//! Portfolio value chart
//!
//! Dual-axis PNG: hedged and unhedged portfolio value on the primary axis,
//! the day's put implied volatility on the secondary axis.

use std::path::Path;

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::core::{HedgeError, HedgeResult, Ledger};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;

/// Render the ledger's value series to a PNG chart at `path`.
pub fn render_value_chart(ledger: &Ledger, path: &Path) -> HedgeResult<()> {
    if ledger.is_empty() {
        return Err(HedgeError::artifact_write("cannot chart an empty ledger"));
    }

    draw(ledger, path).map_err(|e| HedgeError::artifact_write(e.to_string()))
}

fn draw(ledger: &Ledger, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let start = ledger.days[0].date;
    let mut end = ledger.days[ledger.len() - 1].date;
    if end == start {
        end = start + Duration::days(1);
    }

    let (lo, hi) = value_bounds(ledger);
    let iv_hi = ledger
        .days
        .iter()
        .filter_map(|d| d.put_iv)
        .fold(0.0_f64, f64::max)
        .max(0.1)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{}: Daily Dynamic Hedging with 10% OTM Put", ledger.ticker),
            ("sans-serif", 24),
        )
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .right_y_label_area_size(55)
        .build_cartesian_2d(start..end, lo..hi)?
        .set_secondary_coord(start..end, 0.0..iv_hi);

    chart
        .configure_mesh()
        .y_desc("Portfolio Value")
        .x_labels(8)
        .draw()?;
    chart
        .configure_secondary_axes()
        .y_desc("Implied Volatility")
        .draw()?;

    let hedged: Vec<(NaiveDate, f64)> = ledger
        .days
        .iter()
        .zip(&ledger.hedged_value)
        .map(|(d, v)| (d.date, *v))
        .collect();
    let unhedged: Vec<(NaiveDate, f64)> = ledger
        .days
        .iter()
        .zip(&ledger.unhedged_value)
        .map(|(d, v)| (d.date, *v))
        .collect();

    chart
        .draw_series(LineSeries::new(hedged, BLUE.stroke_width(2)))?
        .label("Hedged")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLUE.stroke_width(2)));

    chart
        .draw_series(DashedLineSeries::new(unhedged, 6, 3, RED.into()))?
        .label("Unhedged")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], RED));

    let iv: Vec<(NaiveDate, f64)> = ledger
        .days
        .iter()
        .filter_map(|d| d.put_iv.map(|iv| (d.date, iv)))
        .collect();
    if !iv.is_empty() {
        let iv_color = RGBColor(128, 128, 128).mix(0.5);
        chart
            .draw_secondary_series(LineSeries::new(iv, iv_color))?
            .label("Put IV")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], iv_color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn value_bounds(ledger: &Ledger) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in ledger.hedged_value.iter().chain(&ledger.unhedged_value) {
        lo = lo.min(*v);
        hi = hi.max(*v);
    }
    let pad = ((hi - lo) * 0.05).max(1.0);
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DayRecord;
    use tempfile::tempdir;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new("TEST");
        let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let friday = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();

        for (i, price) in [100.0, 102.0, 99.0, 101.0].iter().enumerate() {
            ledger.push(DayRecord {
                date: monday + Duration::days(i as i64),
                price: *price,
                target_strike: 90.0,
                strike: 90.0,
                put_expiry: friday,
                put_price: 3.0,
                put_iv: Some(0.2 + 0.01 * i as f64),
                put_pnl: 0.0,
                put_sale_price: None,
                put_sale_strike: None,
                stock_change: 0.0,
                hedged_pnl: 0.0,
                unhedged_pnl: 0.0,
                rollover: false,
            });
        }
        ledger
    }

    #[test]
    fn test_empty_ledger_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.png");
        assert!(render_value_chart(&Ledger::new("TEST"), &path).is_err());
    }

    #[test]
    #[ignore] // Requires a system font for axis labels
    fn test_chart_is_rendered() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("TEST_dynamic_hedge_plot.png");

        render_value_chart(&sample_ledger(), &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
