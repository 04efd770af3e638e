//! Per-run configuration passed explicitly into the pipeline.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rules::RuleSet;

/// Entry dates further than this many days from the transaction date are flagged
pub const DEFAULT_ANOMALY_THRESHOLD_DAYS: i64 = 7;

/// Fuzzy-match thresholds (0-100) for each rule group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub custom: u8,
    pub asmen: u8,
    pub mis: u8,
    pub staff_lapang: u8,
    pub admin: u8,
    pub manager: u8,
    pub other: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            custom: 85,
            asmen: 90,
            mis: 85,
            staff_lapang: 85,
            admin: 88,
            manager: 88,
            other: 88,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<()> {
        let all = [
            ("custom", self.custom),
            ("asmen", self.asmen),
            ("mis", self.mis),
            ("staff_lapang", self.staff_lapang),
            ("admin", self.admin),
            ("manager", self.manager),
            ("other", self.other),
        ];
        for (name, value) in all {
            if value > 100 {
                bail!("threshold {name} must be between 0 and 100, got {value}");
            }
        }
        Ok(())
    }
}

/// Everything one recap run depends on besides the rows themselves
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfig {
    /// First day of the first week (usually a Monday)
    pub week_start: NaiveDate,
    pub custom: RuleSet,
    pub thresholds: Thresholds,
    /// Observed values in use: 1 and 7
    pub anomaly_threshold_days: i64,
}

impl RunConfig {
    pub fn new(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            custom: RuleSet::default(),
            thresholds: Thresholds::default(),
            anomaly_threshold_days: DEFAULT_ANOMALY_THRESHOLD_DAYS,
        }
    }

    pub fn with_custom(mut self, custom: RuleSet) -> Self {
        self.custom = custom;
        self
    }

    pub fn with_anomaly_threshold_days(mut self, days: i64) -> Self {
        self.anomaly_threshold_days = days;
        self
    }
}
