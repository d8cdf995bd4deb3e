//! Sources of community protection rules beyond the `default` bucket.

use async_trait::async_trait;
use std::path::PathBuf;

use liberation::{CatalogError, CommunityRuleSet};

/// Loader for per-community rule sets.
#[async_trait]
pub trait RuleSource: Send + Sync {
    /// Human-readable source name for logs.
    fn name(&self) -> &str;

    /// Load every rule set this source provides.
    async fn load(&self) -> Result<Vec<CommunityRuleSet>, CatalogError>;
}

/// In-memory rule sets.
#[derive(Debug, Clone, Default)]
pub struct StaticRuleSource {
    sets: Vec<CommunityRuleSet>,
}

impl StaticRuleSource {
    pub fn new(sets: Vec<CommunityRuleSet>) -> Self {
        Self { sets }
    }
}

#[async_trait]
impl RuleSource for StaticRuleSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn load(&self) -> Result<Vec<CommunityRuleSet>, CatalogError> {
        Ok(self.sets.clone())
    }
}

/// Rule sets read from a YAML file.
#[derive(Debug, Clone)]
pub struct YamlRuleSource {
    path: PathBuf,
    name: String,
}

impl YamlRuleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl RuleSource for YamlRuleSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<CommunityRuleSet>, CatalogError> {
        let yaml = tokio::fs::read_to_string(&self.path).await?;
        CommunityRuleSet::from_yaml(&yaml)
    }
}
