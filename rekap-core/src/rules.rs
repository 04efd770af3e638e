//! User-supplied per-category names for one run.
//!
//! These come from the name-override form (or CLI flags) and are consulted
//! before any built-in keyword list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::category::Category;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    names: BTreeMap<Category, Vec<String>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add names from a comma-separated list ("Irfan, budi ,").
    /// Names are trimmed and lower-cased; blanks and duplicates are dropped.
    pub fn add_names(&mut self, category: Category, list: &str) {
        let entry = self.names.entry(category).or_default();
        for name in split_names(list) {
            if !entry.contains(&name) {
                entry.push(name);
            }
        }
        if entry.is_empty() {
            self.names.remove(&category);
        }
    }

    pub fn with_names(mut self, category: Category, list: &str) -> Self {
        self.add_names(category, list);
        self
    }

    /// Names for one category, in insertion order
    pub fn names(&self, category: Category) -> &[String] {
        self.names.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.names.values().all(Vec::is_empty)
    }

    /// Append every name of `other` that is not already present
    pub fn merge(&mut self, other: &RuleSet) {
        for (category, names) in &other.names {
            self.add_names(*category, &names.join(","));
        }
    }
}

fn split_names(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(|n| n.trim().to_lowercase())
        .filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_names_normalizes() {
        let rules = RuleSet::new().with_names(Category::Asmen, " Irfan, BUDI ,, irfan ");
        assert_eq!(rules.names(Category::Asmen), &["irfan".to_string(), "budi".to_string()]);
        assert!(rules.names(Category::Manager).is_empty());
    }

    #[test]
    fn test_blank_list_leaves_set_empty() {
        let rules = RuleSet::new().with_names(Category::Admin, " , ,");
        assert!(rules.is_empty());
        assert_eq!(rules, RuleSet::default());
    }

    #[test]
    fn test_merge_appends_without_duplicates() {
        let mut a = RuleSet::new().with_names(Category::Mis, "dedi");
        let b = RuleSet::new()
            .with_names(Category::Mis, "dedi, rina")
            .with_names(Category::Other, "satpam");
        a.merge(&b);
        assert_eq!(a.names(Category::Mis), &["dedi".to_string(), "rina".to_string()]);
        assert_eq!(a.names(Category::Other), &["satpam".to_string()]);
    }
}
