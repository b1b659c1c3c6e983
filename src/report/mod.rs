//! Report artifacts
//!
//! Renders a finished ledger into the two persisted outputs: the
//! spreadsheet with rollover-row highlighting and the dual-axis value/IV
//! chart.

pub mod chart;
pub mod excel;

pub use chart::render_value_chart;
pub use excel::write_ledger_workbook;
