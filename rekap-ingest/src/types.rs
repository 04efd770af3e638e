use rekap_core::Transaction;
use serde::Serialize;

/// Parsed ledger export, ready for the recap pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    /// Whether the input carried an entry-date column at all
    pub has_entry_date: bool,
    /// Normalized header names as found in the input
    pub headers: Vec<String>,
}

impl Ledger {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
