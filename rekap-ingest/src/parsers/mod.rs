//! Input-format parsers.

pub mod amount;
pub mod ledger_csv;
