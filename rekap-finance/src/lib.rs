//! rekap-finance: description matcher, category rules, weekly aggregation,
//! entry-date anomaly detection and the end-to-end recap pipeline

pub mod aggregator;
pub mod anomalies;
pub mod category_rules;
pub mod matcher;
pub mod report;

pub use aggregator::{aggregate, grand_total};
pub use anomalies::detect_anomalies;
pub use category_rules::{classify, Classifier, Rule, RuleSource};
pub use matcher::{matches, similarity_scores, SimilarityScores};
pub use report::{build_report, RecapReport};
