// ⚙️ Records Config - Settings as data, loaded from JSON
//
// Every field has a default, so a config file only needs to list what it
// changes. Values are checked once at load time.

use crate::validation::{GRADE_MAX, GRADE_MIN, PASSING_GRADE};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// ORPHAN POLICY
// ============================================================================

/// What happens to enrollments when their student or course is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Enrollments keep their (now orphaned) references
    #[default]
    Retain,

    /// Enrollments referencing the removed entity are dropped too
    Cascade,
}

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    /// Graded average strictly below this marks a student at risk
    pub at_risk_threshold: f64,

    /// How many students the ranking shows
    pub top_students: usize,

    pub orphan_policy: OrphanPolicy,

    /// tracing-subscriber filter used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        RecordsConfig {
            at_risk_threshold: PASSING_GRADE,
            top_students: 10,
            orphan_policy: OrphanPolicy::Retain,
            log_filter: "info".to_string(),
        }
    }
}

impl RecordsConfig {
    /// Load config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: RecordsConfig =
            serde_json::from_str(content).context("Failed to parse config JSON")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(GRADE_MIN..=GRADE_MAX).contains(&self.at_risk_threshold) {
            bail!(
                "at_risk_threshold must be within [{}, {}], got {}",
                GRADE_MIN,
                GRADE_MAX,
                self.at_risk_threshold
            );
        }
        if self.top_students == 0 {
            bail!("top_students must be at least 1");
        }
        if self.log_filter.trim().is_empty() {
            bail!("log_filter must not be blank");
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RecordsConfig::default();
        assert_eq!(config.at_risk_threshold, 7.0);
        assert_eq!(config.top_students, 10);
        assert_eq!(config.orphan_policy, OrphanPolicy::Retain);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RecordsConfig::from_json(r#"{ "orphan_policy": "cascade" }"#).unwrap();
        assert_eq!(config.orphan_policy, OrphanPolicy::Cascade);
        assert_eq!(config.top_students, 10);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(RecordsConfig::from_json(r#"{ "at_risk_threshold": 11.0 }"#).is_err());
        assert!(RecordsConfig::from_json(r#"{ "top_students": 0 }"#).is_err());
        assert!(RecordsConfig::from_json(r#"{ "orphan_policy": "explode" }"#).is_err());
        assert!(RecordsConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "at_risk_threshold": 6.0, "top_students": 3 }}"#).unwrap();

        let config = RecordsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.at_risk_threshold, 6.0);
        assert_eq!(config.top_students, 3);
    }

    #[test]
    fn test_missing_file() {
        let err = RecordsConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
