//! Configuration for journey evaluation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::{JourneyError, Result};

/// Configuration for a [`JourneyEvaluator`](crate::JourneyEvaluator).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyConfig {
    /// Evaluator instance ID
    pub evaluator_id: String,
    /// Progression gate configuration
    pub progression: ProgressionConfig,
    /// Rule catalog configuration
    pub catalog: CatalogConfig,
    /// General settings
    pub general: GeneralConfig,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            evaluator_id: uuid::Uuid::new_v4().to_string(),
            progression: ProgressionConfig::default(),
            catalog: CatalogConfig::default(),
            general: GeneralConfig::default(),
        }
    }
}

impl JourneyConfig {
    /// Create a new config with evaluator ID.
    pub fn new(evaluator_id: impl Into<String>) -> Self {
        Self {
            evaluator_id: evaluator_id.into(),
            ..Default::default()
        }
    }

    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Check thresholds and timeouts are usable.
    pub fn validate(&self) -> Result<()> {
        let p = &self.progression;
        for (name, value) in [
            ("criteria_readiness_min", p.criteria_readiness_min),
            ("member_readiness_min", p.member_readiness_min),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(JourneyError::ConfigError(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if p.oracle_timeout_ms == 0 {
            return Err(JourneyError::ConfigError(
                "oracle_timeout_ms must be greater than zero".to_string(),
            ));
        }

        if self.general.audit_enabled && self.general.audit_max_entries == 0 {
            return Err(JourneyError::ConfigError(
                "audit_max_entries must be greater than zero when auditing".to_string(),
            ));
        }

        Ok(())
    }
}

/// Progression gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Time allowed for the community-support oracle (ms)
    pub oracle_timeout_ms: u64,
    /// Minimum empowerment score of a rule's own criteria.
    ///
    /// Defaults to the fixed readiness gate of 0.7; override only for
    /// deployments that deliberately tune readiness.
    pub criteria_readiness_min: f64,
    /// Minimum empowerment score of the member's values.
    ///
    /// Defaults to the fixed readiness gate of 0.6.
    pub member_readiness_min: f64,
}

impl ProgressionConfig {
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_millis(self.oracle_timeout_ms)
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            oracle_timeout_ms: 5000,
            criteria_readiness_min: 0.7,
            member_readiness_min: 0.6,
        }
    }
}

/// Rule catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a YAML file of extra community rule sets
    pub rules_path: Option<String>,
    /// Seed the `default` community bucket
    pub include_default_rules: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            rules_path: None,
            include_default_rules: true,
        }
    }
}

/// General configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable the evaluation audit trail (off by default; every audited
    /// evaluation takes the shared log's write lock)
    pub audit_enabled: bool,
    /// Maximum audit entries retained
    pub audit_max_entries: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            audit_enabled: false,
            audit_max_entries: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = JourneyConfig::default();
        assert_eq!(config.progression.oracle_timeout_ms, 5000);
        assert_eq!(config.progression.criteria_readiness_min, 0.7);
        assert_eq!(config.progression.member_readiness_min, 0.6);
        assert!(config.catalog.include_default_rules);
        assert!(!config.general.audit_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = JourneyConfig::new("test-evaluator");
        let yaml = config.to_yaml().unwrap();
        let parsed = JourneyConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.evaluator_id, "test-evaluator");
        assert_eq!(parsed.progression.oracle_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_threshold() {
        let mut config = JourneyConfig::default();
        config.progression.member_readiness_min = 1.5;
        assert!(matches!(config.validate(), Err(JourneyError::ConfigError(_))));
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = JourneyConfig::default();
        config.progression.oracle_timeout_ms = 0;
        assert!(config.validate().is_err());
    }
}
