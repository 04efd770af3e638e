//! Weekly recap rows.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::ops::AddAssign;

use crate::category::Category;
use crate::window::WeeklyWindow;

/// Debit sums for all six categories. Absent categories read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryTotals {
    amounts: [f64; 6],
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> f64 {
        self.amounts[category.index()]
    }

    pub fn add(&mut self, category: Category, amount: f64) {
        self.amounts[category.index()] += amount;
    }

    /// All categories in recap column order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::SUMMARY_ORDER.iter().map(|c| (*c, self.get(*c)))
    }

    pub fn total(&self) -> f64 {
        self.amounts.iter().sum()
    }
}

impl AddAssign<&CategoryTotals> for CategoryTotals {
    fn add_assign(&mut self, other: &CategoryTotals) {
        for (a, b) in self.amounts.iter_mut().zip(other.amounts.iter()) {
            *a += *b;
        }
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::SUMMARY_ORDER.len()))?;
        for (category, amount) in self.iter() {
            map.serialize_entry(category.as_str(), &amount)?;
        }
        map.end()
    }
}

/// One recap line per week that had at least one transaction
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WeeklySummaryRow {
    pub label: String,
    pub window: WeeklyWindow,
    pub transaction_count: usize,
    pub totals: CategoryTotals,
}
