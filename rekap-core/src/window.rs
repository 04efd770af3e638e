//! Weekly windows anchored at a user-chosen start date.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::time::format_dmy;

/// A 7-day bucket `[start, end]`, inclusive on both sides.
///
/// `end` is clamped to the last date in the data; `nominal_end` is always
/// `start + 6 days` and is what the label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub nominal_end: NaiveDate,
}

impl WeeklyWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_truncated(&self) -> bool {
        self.end < self.nominal_end
    }

    /// "dd/mm/yyyy - dd/mm/yyyy"
    pub fn label(&self) -> String {
        format!("{} - {}", format_dmy(self.start), format_dmy(self.nominal_end))
    }
}

/// Contiguous 7-day windows from `start` until `end`, last one truncated.
///
/// Each step advances by a full 7 days from the previous start, so a
/// truncated final window never shifts the grid. Empty if `start > end`.
pub fn generate_windows(start: NaiveDate, end: NaiveDate) -> Vec<WeeklyWindow> {
    let mut out = Vec::new();
    let mut current = start;
    while current <= end {
        let nominal_end = current + Duration::days(6);
        out.push(WeeklyWindow {
            start: current,
            end: nominal_end.min(end),
            nominal_end,
        });
        current += Duration::days(7);
    }
    out
}
