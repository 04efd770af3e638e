//! Ordered category rules mapping a transaction description to a job role.
//!
//! Evaluation is first-match-wins over one explicit list:
//! user-supplied names first, then the built-in groups in this order:
//! Asmen, MIS, StaffLapang, Admin, Manager, Other filler words.
//!
//! Asmen runs first and strictest because "asisten manajer" contains the
//! manager keywords. Manager runs late because "mc"/"bm"/"manajer" also
//! occur inside other job titles.

use rekap_core::{CategorizedTransaction, Category, RuleSet, Thresholds, Transaction};
use tracing::trace;

use crate::matcher::matches;

pub const ASMEN_KEYWORDS: &[&str] = &[
    "asisten manajer cabang",
    "asisten manager cabang",
    "asisten manajer",
    "asisten manager",
    "asisten",
    "assistant",
    "asmen",
    "asman",
];

pub const MIS_KEYWORDS: &[&str] = &[
    "staf mis",
    "staff mis",
    "sistem informasi",
    "staf it",
    "staff it",
    "mis",
    "msa",
];

/// Field staff, including weekly and day laborers
pub const STAFF_LAPANG_KEYWORDS: &[&str] = &[
    "staf lapang",
    "staff lapang",
    "lapangan",
    "lapang",
    "pekerja harian",
    "tenaga harian",
    "harian",
    "mingguan",
];

pub const ADMIN_KEYWORDS: &[&str] = &[
    "staf administrasi",
    "staff administrasi",
    "staf admin",
    "staff admin",
    "administrasi",
    "admin 1",
    "admin 2",
    "admin",
    "fsa",
];

pub const MANAGER_KEYWORDS: &[&str] = &[
    "manajer cabang",
    "manager cabang",
    "kepala cabang",
    "manajer",
    "manager",
    "mc",
    "bm",
];

pub const OTHER_KEYWORDS: &[&str] = &["lainnya", "lain-lain", "lain lain", "umum"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    /// Names entered for this run
    Custom,
    BuiltIn,
}

/// One step of the priority chain
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub category: Category,
    pub source: RuleSource,
    pub keywords: Vec<String>,
    pub threshold: u8,
}

impl Rule {
    fn built_in(category: Category, keywords: &[&str], threshold: u8) -> Self {
        Self {
            category,
            source: RuleSource::BuiltIn,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            threshold,
        }
    }

    pub fn matches(&self, description: Option<&str>) -> bool {
        matches(description, self.keywords.as_slice(), self.threshold)
    }
}

/// Immutable rule list for one run
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    pub fn new(custom: &RuleSet, thresholds: &Thresholds) -> Self {
        let mut rules: Vec<Rule> = Category::CUSTOM_ORDER
            .iter()
            .filter(|c| !custom.names(**c).is_empty())
            .map(|c| Rule {
                category: *c,
                source: RuleSource::Custom,
                keywords: custom.names(*c).to_vec(),
                threshold: thresholds.custom,
            })
            .collect();

        rules.extend([
            Rule::built_in(Category::Asmen, ASMEN_KEYWORDS, thresholds.asmen),
            Rule::built_in(Category::Mis, MIS_KEYWORDS, thresholds.mis),
            Rule::built_in(Category::StaffLapang, STAFF_LAPANG_KEYWORDS, thresholds.staff_lapang),
            Rule::built_in(Category::Admin, ADMIN_KEYWORDS, thresholds.admin),
            Rule::built_in(Category::Manager, MANAGER_KEYWORDS, thresholds.manager),
            Rule::built_in(Category::Other, OTHER_KEYWORDS, thresholds.other),
        ]);

        Self { rules }
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Category of one description. Total: falls back to `Other`.
    pub fn classify(&self, description: Option<&str>) -> Category {
        for rule in &self.rules {
            if rule.matches(description) {
                trace!(?description, category = %rule.category, source = ?rule.source, "matched");
                return rule.category;
            }
        }
        trace!(?description, "no rule matched, using Other");
        Category::Other
    }

    pub fn classify_all(&self, rows: &[Transaction]) -> Vec<CategorizedTransaction> {
        rows.iter()
            .enumerate()
            .map(|(row_index, t)| CategorizedTransaction {
                row_index,
                transaction: t.clone(),
                category: self.classify(t.description.as_deref()),
            })
            .collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&RuleSet::default(), &Thresholds::default())
    }
}

/// One-off classification; prefer building a `Classifier` for many rows.
pub fn classify(description: Option<&str>, custom: &RuleSet, thresholds: &Thresholds) -> Category {
    Classifier::new(custom, thresholds).classify(description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(desc: &str) -> Category {
        Classifier::default().classify(Some(desc))
    }

    #[test]
    fn test_asisten_manajer_is_asmen_not_manager() {
        assert_eq!(cat("asisten manajer cabang"), Category::Asmen);
        assert_eq!(cat("Dibayar BBM untuk transport Asisten Manager (dewi)"), Category::Asmen);
    }

    #[test]
    fn test_each_builtin_group() {
        assert_eq!(cat("Dibayar BBM untuk transport manajer cabang"), Category::Manager);
        assert_eq!(cat("Dibayar BBM untuk transport MC (andi)"), Category::Manager);
        assert_eq!(cat("BBM transport staf admin"), Category::Admin);
        assert_eq!(cat("BBM transport FSA (rina)"), Category::Admin);
        assert_eq!(cat("BBM transport staff MIS"), Category::Mis);
        assert_eq!(cat("BBM staf lapang minggu 2"), Category::StaffLapang);
        assert_eq!(cat("BBM pekerja harian"), Category::StaffLapang);
        assert_eq!(cat("BBM lain-lain"), Category::Other);
    }

    #[test]
    fn test_unmatched_and_missing_fall_back_to_other() {
        let c = Classifier::default();
        assert_eq!(c.classify(None), Category::Other);
        assert_eq!(c.classify(Some("")), Category::Other);
        assert_eq!(c.classify(Some("Dibayar BBM untuk transport (irfan)")), Category::Other);
    }

    #[test]
    fn test_bbm_does_not_imply_manager() {
        assert_eq!(cat("Dibayar BBM untuk transport"), Category::Other);
    }

    #[test]
    fn test_exact_keyword_beats_later_fuzzy_candidate() {
        // "fsa" is an exact Admin hit even though "manajre" is fuzzy-close to Manager
        assert_eq!(cat("transport fsa manajre"), Category::Admin);
    }

    #[test]
    fn test_typo_still_classified() {
        assert_eq!(cat("transport manajre cabang"), Category::Manager);
    }

    #[test]
    fn test_custom_names_override_builtins() {
        let custom = RuleSet::new().with_names(Category::Asmen, "Irfan");
        let t = Thresholds::default();
        assert_eq!(classify(Some("transport (irfan)"), &custom, &t), Category::Asmen);

        // custom wins even against a literal built-in keyword
        let custom = RuleSet::new().with_names(Category::Mis, "budi");
        assert_eq!(classify(Some("transport manajer (budi)"), &custom, &t), Category::Mis);
    }

    #[test]
    fn test_custom_order_manager_before_asmen() {
        let custom = RuleSet::new()
            .with_names(Category::Asmen, "andi")
            .with_names(Category::Manager, "andi");
        let c = Classifier::new(&custom, &Thresholds::default());
        assert_eq!(c.classify(Some("bbm andi")), Category::Manager);
    }

    #[test]
    fn test_rule_list_order() {
        let custom = RuleSet::new()
            .with_names(Category::Other, "satpam")
            .with_names(Category::Admin, "sari");
        let c = Classifier::new(&custom, &Thresholds::default());
        let order: Vec<(Category, RuleSource)> =
            c.rules().iter().map(|r| (r.category, r.source)).collect();
        assert_eq!(
            order,
            vec![
                (Category::Admin, RuleSource::Custom),
                (Category::Other, RuleSource::Custom),
                (Category::Asmen, RuleSource::BuiltIn),
                (Category::Mis, RuleSource::BuiltIn),
                (Category::StaffLapang, RuleSource::BuiltIn),
                (Category::Admin, RuleSource::BuiltIn),
                (Category::Manager, RuleSource::BuiltIn),
                (Category::Other, RuleSource::BuiltIn),
            ]
        );
        assert_eq!(c.rules()[2].threshold, 90);
        assert_eq!(c.rules()[0].threshold, 85);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let c = Classifier::default();
        let descs = ["asmen", "bm", "x", "staf admin", "harian"];
        let first: Vec<_> = descs.iter().map(|d| c.classify(Some(d))).collect();
        let second: Vec<_> = descs.iter().map(|d| c.classify(Some(d))).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_classify_all_keeps_row_index() {
        let d = chrono::NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let rows = vec![Transaction::new(d, "asmen", 1.0), Transaction::new(d, "mc", 2.0)];
        let out = Classifier::default().classify_all(&rows);
        assert_eq!(out[0].row_index, 0);
        assert_eq!(out[1].category, Category::Manager);
    }
}
