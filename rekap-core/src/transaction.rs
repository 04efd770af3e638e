//! Ledger rows as handed over by the spreadsheet reader.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A date cell that may be unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowDate {
    Parsed(NaiveDate),
    Invalid { raw: String },
    Missing,
}

impl RowDate {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            RowDate::Parsed(d) => Some(*d),
            _ => None,
        }
    }

    /// Raw text for invalid cells, `None` otherwise
    pub fn raw(&self) -> Option<&str> {
        match self {
            RowDate::Invalid { raw } => Some(raw.as_str()),
            _ => None,
        }
    }
}

/// One ledger row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Voucher number, opaque
    pub voucher: Option<String>,
    pub trans_date: RowDate,
    /// Only present when the input has an entry-date column
    pub entry_date: Option<RowDate>,
    pub description: Option<String>,
    /// Non-negative; missing or "-" is 0
    pub debit: f64,
}

impl Transaction {
    pub fn new(trans_date: NaiveDate, description: impl Into<String>, debit: f64) -> Self {
        Self {
            voucher: None,
            trans_date: RowDate::Parsed(trans_date),
            entry_date: None,
            description: Some(description.into()),
            debit,
        }
    }

    pub fn with_voucher(mut self, voucher: impl Into<String>) -> Self {
        self.voucher = Some(voucher.into());
        self
    }

    pub fn with_entry_date(mut self, entry_date: NaiveDate) -> Self {
        self.entry_date = Some(RowDate::Parsed(entry_date));
        self
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.trans_date.date()
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// A row together with the category the classifier assigned to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizedTransaction {
    /// Position in the input, 0-based
    pub row_index: usize,
    pub transaction: Transaction,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateField {
    TransactionDate,
    EntryDate,
}

impl DateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateField::TransactionDate => "transaction date",
            DateField::EntryDate => "entry date",
        }
    }
}

/// A row excluded from date-based processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateIssue {
    pub row_index: usize,
    pub voucher: Option<String>,
    pub field: DateField,
    /// `None` when the cell was empty
    pub raw: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_dates() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let t = Transaction::new(d, "BBM", 10.0)
            .with_voucher("V1")
            .with_entry_date(d);
        assert_eq!(t.date(), Some(d));
        assert_eq!(t.entry_date, Some(RowDate::Parsed(d)));
        assert_eq!(t.voucher.as_deref(), Some("V1"));
    }

    #[test]
    fn test_missing_description_reads_as_empty() {
        let mut t = Transaction::new(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(), "x", 0.0);
        t.description = None;
        assert_eq!(t.description_or_empty(), "");
        assert_eq!(RowDate::Invalid { raw: "x".into() }.date(), None);
    }
}
