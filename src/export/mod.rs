//! Export module for the tracker
//!
//! - CSV: one row per transaction, spreadsheet-compatible

pub mod csv;

pub use self::csv::export_transactions_csv;
