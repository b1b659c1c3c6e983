//! Ledger spreadsheet export
//!
//! One row per simulation day in a fixed column order. Rows that rolled
//! the put are highlighted; the highlight keys off the record's rollover
//! field, not a column position.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

use crate::core::{DayRecord, HedgeError, HedgeResult, Ledger};

impl From<XlsxError> for HedgeError {
    fn from(e: XlsxError) -> Self {
        HedgeError::ArtifactWrite(e.to_string())
    }
}

/// Fixed output column order.
pub const COLUMNS: [&str; 16] = [
    "Date",
    "Price",
    "TargetStrike",
    "Strike",
    "PutExpiry",
    "PutPrice",
    "PutIV",
    "PutPnL",
    "PutSalePrice",
    "PutSaleStrike",
    "StockChange",
    "HedgedPnL",
    "UnhedgedPnL",
    "Rollover",
    "Hedged_Value",
    "Unhedged_Value",
];

const ROLLOVER_FILL: u32 = 0xFFF3C9;

/// Write the ledger to an xlsx workbook at `path`.
pub fn write_ledger_workbook(ledger: &Ledger, path: &Path) -> HedgeResult<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    let fill = Format::new().set_background_color(Color::RGB(ROLLOVER_FILL));
    for (i, day) in ledger.days.iter().enumerate() {
        let format = day.rollover.then_some(&fill);
        write_day_row(
            sheet,
            (i + 1) as u32,
            day,
            ledger.hedged_value[i],
            ledger.unhedged_value[i],
            format,
        )?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_day_row(
    sheet: &mut Worksheet,
    row: u32,
    day: &DayRecord,
    hedged_value: f64,
    unhedged_value: f64,
    format: Option<&Format>,
) -> Result<(), XlsxError> {
    let mut cells = RowCells {
        sheet,
        row,
        col: 0,
        format,
    };

    cells.text(&day.date.format("%Y-%m-%d").to_string())?;
    cells.number(day.price)?;
    cells.number(day.target_strike)?;
    cells.number(day.strike)?;
    cells.text(&day.put_expiry.format("%Y-%m-%d").to_string())?;
    cells.number(day.put_price)?;
    cells.maybe_number(day.put_iv)?;
    cells.number(day.put_pnl)?;
    cells.maybe_number(day.put_sale_price)?;
    cells.maybe_number(day.put_sale_strike)?;
    cells.number(day.stock_change)?;
    cells.number(day.hedged_pnl)?;
    cells.number(day.unhedged_pnl)?;
    cells.boolean(day.rollover)?;
    cells.number(hedged_value)?;
    cells.number(unhedged_value)?;
    Ok(())
}

/// Left-to-right cell writer applying the row's highlight format, if any.
struct RowCells<'a> {
    sheet: &'a mut Worksheet,
    row: u32,
    col: u16,
    format: Option<&'a Format>,
}

impl RowCells<'_> {
    fn text(&mut self, value: &str) -> Result<(), XlsxError> {
        match self.format {
            Some(f) => self.sheet.write_string_with_format(self.row, self.col, value, f)?,
            None => self.sheet.write_string(self.row, self.col, value)?,
        };
        self.col += 1;
        Ok(())
    }

    fn number(&mut self, value: f64) -> Result<(), XlsxError> {
        match self.format {
            Some(f) => self.sheet.write_number_with_format(self.row, self.col, value, f)?,
            None => self.sheet.write_number(self.row, self.col, value)?,
        };
        self.col += 1;
        Ok(())
    }

    fn maybe_number(&mut self, value: Option<f64>) -> Result<(), XlsxError> {
        match value {
            Some(v) => self.number(v),
            None => {
                if let Some(f) = self.format {
                    self.sheet.write_blank(self.row, self.col, f)?;
                }
                self.col += 1;
                Ok(())
            }
        }
    }

    fn boolean(&mut self, value: bool) -> Result<(), XlsxError> {
        match self.format {
            Some(f) => self.sheet.write_boolean_with_format(self.row, self.col, value, f)?,
            None => self.sheet.write_boolean(self.row, self.col, value)?,
        };
        self.col += 1;
        Ok(())
    }
}
