//! Entry-date anomalies.

use chrono::NaiveDate;
use serde::Serialize;

/// A row whose entry date is too far from its transaction date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyRecord {
    pub row_index: usize,
    pub voucher: Option<String>,
    pub trans_date: NaiveDate,
    pub entry_date: NaiveDate,
    /// entry_date - trans_date, in days
    pub day_diff: i64,
    pub description: Option<String>,
    pub debit: f64,
}
