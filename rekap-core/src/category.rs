//! Job-role categories used as recap columns.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Job-role category inferred from a transaction description
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Manager,
    Asmen,
    Admin,
    #[serde(rename = "MIS")]
    Mis,
    StaffLapang,
    Other,
}

impl Category {
    /// Column order of the weekly recap
    pub const SUMMARY_ORDER: [Category; 6] = [
        Category::Admin,
        Category::Asmen,
        Category::Other,
        Category::Manager,
        Category::Mis,
        Category::StaffLapang,
    ];

    /// Order in which user-supplied names are consulted
    pub const CUSTOM_ORDER: [Category; 6] = [
        Category::Manager,
        Category::Asmen,
        Category::Admin,
        Category::Mis,
        Category::StaffLapang,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Manager => "Manager",
            Category::Asmen => "Asmen",
            Category::Admin => "Admin",
            Category::Mis => "MIS",
            Category::StaffLapang => "StaffLapang",
            Category::Other => "Other",
        }
    }

    /// Dense index, stable across runs
    pub(crate) fn index(&self) -> usize {
        match self {
            Category::Manager => 0,
            Category::Asmen => 1,
            Category::Admin => 2,
            Category::Mis => 3,
            Category::StaffLapang => 4,
            Category::Other => 5,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    /// Accepts the display labels case-insensitively, plus the older
    /// `Admin/FSA`, `MIS/MSA` and `Lainnya` column names.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect();
        let category = match key.as_str() {
            "manager" | "manajer" => Category::Manager,
            "asmen" | "asistenmanajer" => Category::Asmen,
            "admin" | "admin/fsa" | "fsa" => Category::Admin,
            "mis" | "mis/msa" | "msa" => Category::Mis,
            "stafflapang" | "staflapang" => Category::StaffLapang,
            "other" | "lainnya" => Category::Other,
            _ => bail!("unknown category: {s}"),
        };
        Ok(category)
    }
}
