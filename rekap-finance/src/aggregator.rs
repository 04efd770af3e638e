//! Weekly cross-tabulation of debit per category.

use rekap_core::{CategorizedTransaction, CategoryTotals, WeeklySummaryRow, WeeklyWindow};
use tracing::debug;

/// Sum debit per category for each window.
///
/// Windows without any transaction produce no row. Rows with an unusable
/// transaction date never fall into a window.
pub fn aggregate(rows: &[CategorizedTransaction], windows: &[WeeklyWindow]) -> Vec<WeeklySummaryRow> {
    let mut out = Vec::new();

    for window in windows {
        let mut totals = CategoryTotals::default();
        let mut count = 0usize;

        for row in rows {
            let Some(date) = row.transaction.date() else {
                continue;
            };
            if window.contains(date) {
                totals.add(row.category, row.transaction.debit);
                count += 1;
            }
        }

        debug!(window = %window.label(), count, total = totals.total(), "aggregated window");
        if count == 0 {
            continue;
        }

        out.push(WeeklySummaryRow {
            label: window.label(),
            window: *window,
            transaction_count: count,
            totals,
        });
    }

    out
}

/// Column-wise sum of recap rows
pub fn grand_total(rows: &[WeeklySummaryRow]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for row in rows {
        totals += &row.totals;
    }
    totals
}
