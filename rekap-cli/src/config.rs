use anyhow::{Context, Result};
use rekap_core::{Category, RuleSet, Thresholds, DEFAULT_ANOMALY_THRESHOLD_DAYS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of rekap.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// dd/mm/yyyy; `--start` overrides it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_start: Option<String>,
    /// Recognized range is 1-7 days
    pub anomaly_threshold_days: i64,
    pub thresholds: Thresholds,
    /// Category key -> comma-separated names, e.g. asmen = "irfan, dewi"
    pub custom_names: BTreeMap<String, String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            week_start: None,
            anomaly_threshold_days: DEFAULT_ANOMALY_THRESHOLD_DAYS,
            thresholds: Thresholds::default(),
            custom_names: BTreeMap::new(),
        }
    }
}

impl FileConfig {
    pub fn custom_rules(&self) -> Result<RuleSet> {
        let mut rules = RuleSet::new();
        for (key, list) in &self.custom_names {
            let category: Category = key
                .parse()
                .with_context(|| format!("custom_names.{key}"))?;
            rules.add_names(category, list);
        }
        Ok(rules)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("rekap.toml")
}

/// Explicit path must exist; the default path falls back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<FileConfig> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = default_config_path();
            if !p.exists() {
                return Ok(FileConfig::default());
            }
            p
        }
    };
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(path: &Path, cfg: &FileConfig) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &FileConfig::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let cfg: FileConfig = toml::from_str("[thresholds]\nmanager = 92\n").unwrap();
        assert_eq!(cfg.thresholds.manager, 92);
        assert_eq!(cfg.thresholds.asmen, 90);
        assert_eq!(cfg.anomaly_threshold_days, 7);
        assert!(cfg.week_start.is_none());
    }

    #[test]
    fn test_custom_names_keys_are_categories() {
        let cfg: FileConfig = toml::from_str(
            "[custom_names]\nAdmin = \"sari, rina\"\n\"staff lapang\" = \"joko\"\n",
        )
        .unwrap();
        let rules = cfg.custom_rules().unwrap();
        assert_eq!(rules.names(Category::Admin), &["sari".to_string(), "rina".to_string()]);
        assert_eq!(rules.names(Category::StaffLapang), &["joko".to_string()]);

        let bad: FileConfig = toml::from_str("[custom_names]\nsopir = \"x\"\n").unwrap();
        let err = bad.custom_rules().unwrap_err();
        assert!(format!("{err:#}").contains("custom_names.sopir"));
    }

    #[test]
    fn test_init_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rekap.toml");
        init_config(&path).unwrap();
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.anomaly_threshold_days, DEFAULT_ANOMALY_THRESHOLD_DAYS);
        assert_eq!(cfg.thresholds, Thresholds::default());
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("read"));
    }
}
