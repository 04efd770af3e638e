//! End-to-end recap: classify, bucket into weeks, aggregate, check dates.

use chrono::NaiveDate;
use rekap_core::{
    generate_windows, AnomalyRecord, CategorizedTransaction, CategoryTotals, DateField, DateIssue,
    RowDate, RunConfig, Transaction, WeeklySummaryRow, WeeklyWindow,
};
use serde::Serialize;
use tracing::info;

use crate::aggregator::{aggregate, grand_total};
use crate::anomalies::detect_anomalies;
use crate::category_rules::Classifier;

/// All result sets of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecapReport {
    pub categorized: Vec<CategorizedTransaction>,
    pub windows: Vec<WeeklyWindow>,
    pub weekly: Vec<WeeklySummaryRow>,
    pub anomalies: Vec<AnomalyRecord>,
    /// Rows left out of weekly and anomaly processing because of a bad date
    pub date_issues: Vec<DateIssue>,
}

impl RecapReport {
    pub fn grand_total(&self) -> CategoryTotals {
        grand_total(&self.weekly)
    }
}

pub fn build_report(rows: &[Transaction], config: &RunConfig) -> RecapReport {
    let classifier = Classifier::new(&config.custom, &config.thresholds);
    let categorized = classifier.classify_all(rows);

    let windows = match last_transaction_date(rows) {
        Some(end) => generate_windows(config.week_start, end),
        None => Vec::new(),
    };
    let weekly = aggregate(&categorized, &windows);
    let anomalies = detect_anomalies(rows, config.anomaly_threshold_days);
    let date_issues = collect_date_issues(rows);

    info!(
        rows = rows.len(),
        windows = windows.len(),
        weeks = weekly.len(),
        anomalies = anomalies.len(),
        date_issues = date_issues.len(),
        "recap built"
    );

    RecapReport {
        categorized,
        windows,
        weekly,
        anomalies,
        date_issues,
    }
}

fn last_transaction_date(rows: &[Transaction]) -> Option<NaiveDate> {
    rows.iter().filter_map(Transaction::date).max()
}

/// Invalid or missing transaction dates, and invalid or empty entry-date
/// cells. A ledger without an entry-date column produces no entry issues.
fn collect_date_issues(rows: &[Transaction]) -> Vec<DateIssue> {
    let mut out = Vec::new();
    for (row_index, t) in rows.iter().enumerate() {
        let mut push = |field: DateField, date: &RowDate| {
            if date.date().is_none() {
                out.push(DateIssue {
                    row_index,
                    voucher: t.voucher.clone(),
                    field,
                    raw: date.raw().map(str::to_string),
                });
            }
        };
        push(DateField::TransactionDate, &t.trans_date);
        if let Some(entry) = &t.entry_date {
            push(DateField::EntryDate, entry);
        }
    }
    out
}
