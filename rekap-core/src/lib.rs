//! rekap-core: Core types for the weekly fuel-expense recap

pub mod anomaly;
pub mod category;
pub mod config;
pub mod rules;
pub mod summary;
pub mod time;
pub mod transaction;
pub mod window;

pub use anomaly::AnomalyRecord;
pub use category::Category;
pub use config::{RunConfig, Thresholds, DEFAULT_ANOMALY_THRESHOLD_DAYS};
pub use rules::RuleSet;
pub use summary::{CategoryTotals, WeeklySummaryRow};
pub use time::{format_dmy, parse_dmy, parse_row_date};
pub use transaction::{CategorizedTransaction, DateField, DateIssue, RowDate, Transaction};
pub use window::{generate_windows, WeeklyWindow};
