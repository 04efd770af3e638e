//! Entry-date anomaly detection.
//!
//! A row is suspicious when it was entered long before or after the
//! transaction date. Rows without both dates are skipped.

use rekap_core::{AnomalyRecord, Transaction};

pub fn detect_anomalies(rows: &[Transaction], threshold_days: i64) -> Vec<AnomalyRecord> {
    rows.iter()
        .enumerate()
        .filter_map(|(row_index, t)| {
            let trans_date = t.trans_date.date()?;
            let entry_date = t.entry_date.as_ref()?.date()?;
            let day_diff = (entry_date - trans_date).num_days();
            if day_diff.abs() <= threshold_days {
                return None;
            }
            Some(AnomalyRecord {
                row_index,
                voucher: t.voucher.clone(),
                trans_date,
                entry_date,
                day_diff,
                description: t.description.clone(),
                debit: t.debit,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rekap_core::RowDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(trans: NaiveDate, entry: NaiveDate) -> Transaction {
        Transaction::new(trans, "BBM", 100.0).with_entry_date(entry)
    }

    #[test]
    fn test_flags_beyond_threshold_only() {
        let rows = vec![
            txn(ymd(2025, 1, 6), ymd(2025, 1, 6)),
            txn(ymd(2025, 1, 6), ymd(2025, 1, 13)),
            txn(ymd(2025, 1, 6), ymd(2025, 1, 14)),
        ];
        let out = detect_anomalies(&rows, 7);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].row_index, 2);
        assert_eq!(out[0].day_diff, 8);
    }

    #[test]
    fn test_sign_symmetry() {
        let late = txn(ymd(2025, 1, 6), ymd(2025, 1, 9));
        let early = txn(ymd(2025, 1, 9), ymd(2025, 1, 6));
        let out = detect_anomalies(&[late, early], 1);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].day_diff, 3);
        assert_eq!(out[1].day_diff, -3);
    }

    #[test]
    fn test_missing_or_invalid_dates_are_not_anomalies() {
        let mut no_entry = Transaction::new(ymd(2025, 1, 6), "x", 1.0);
        no_entry.entry_date = None;
        let mut bad_entry = no_entry.clone();
        bad_entry.entry_date = Some(RowDate::Invalid { raw: "31/02/2025".into() });
        let mut bad_trans = txn(ymd(2025, 1, 6), ymd(2025, 3, 1));
        bad_trans.trans_date = RowDate::Missing;

        assert!(detect_anomalies(&[no_entry, bad_entry, bad_trans], 1).is_empty());
    }

    #[test]
    fn test_preserves_input_order() {
        let rows = vec![
            txn(ymd(2025, 2, 1), ymd(2025, 1, 1)),
            txn(ymd(2025, 1, 1), ymd(2025, 2, 1)),
        ];
        let idx: Vec<_> = detect_anomalies(&rows, 7).iter().map(|a| a.row_index).collect();
        assert_eq!(idx, vec![0, 1]);
    }
}
