//! Rule catalog.
//!
//! Holds the two static rule tables consulted by the engines:
//!
//! - progression rules keyed by `(from_stage, to_stage)`
//! - protection rules keyed by community id, kept in catalog order
//!
//! A catalog is assembled once through [`CatalogBuilder`] and is immutable
//! afterwards, so it can be shared behind an `Arc` across concurrent
//! evaluations without locking.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{CommunityInteractionRule, JourneyStage, LiberationValues, ProgressionRule};

/// Community bucket seeded with the built-in protection rules.
pub const DEFAULT_COMMUNITY: &str = "default";

/// Error types for catalog assembly.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Rule file could not be parsed
    #[error("Failed to parse rule definitions: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Rule file could not be read
    #[error("Failed to read rule definitions: {0}")]
    Io(#[from] std::io::Error),

    /// Two rules in one community share an id
    #[error("Duplicate rule '{rule_id}' in community '{community_id}'")]
    DuplicateRule {
        community_id: String,
        rule_id: String,
    },

    /// A rule that can never apply
    #[error("Rule '{0}' has no applicable stages")]
    EmptyStages(String),
}

/// Protection rules contributed for one community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityRuleSet {
    pub community_id: String,
    pub rules: Vec<CommunityInteractionRule>,
}

impl CommunityRuleSet {
    pub fn new(community_id: impl Into<String>, rules: Vec<CommunityInteractionRule>) -> Self {
        Self {
            community_id: community_id.into(),
            rules,
        }
    }

    /// Parse a YAML list of rule sets.
    pub fn from_yaml(yaml: &str) -> Result<Vec<Self>, CatalogError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Immutable table of progression and protection rules.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    progression: BTreeMap<(JourneyStage, JourneyStage), ProgressionRule>,
    communities: BTreeMap<String, Vec<CommunityInteractionRule>>,
    fingerprint: String,
}

impl RuleCatalog {
    /// Start an empty builder.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Catalog holding only the seed tables.
    pub fn seeded() -> Self {
        CatalogBuilder::seeded().build()
    }

    /// Look up the rule for a transition.
    pub fn progression_rule(&self, from: JourneyStage, to: JourneyStage) -> Option<&ProgressionRule> {
        self.progression.get(&(from, to))
    }

    /// All progression rules, ordered by transition.
    pub fn progression_rules(&self) -> impl Iterator<Item = &ProgressionRule> {
        self.progression.values()
    }

    /// Protection rules for a community, in catalog order.
    ///
    /// Unknown communities have no rules.
    pub fn community_rules(&self, community_id: &str) -> &[CommunityInteractionRule] {
        self.communities
            .get(community_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Known community ids.
    pub fn communities(&self) -> impl Iterator<Item = &str> {
        self.communities.keys().map(|k| k.as_str())
    }

    /// SHA-256 over every rule, for audit.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    fn compute_fingerprint(
        progression: &BTreeMap<(JourneyStage, JourneyStage), ProgressionRule>,
        communities: &BTreeMap<String, Vec<CommunityInteractionRule>>,
    ) -> String {
        let mut hasher = Sha256::new();

        for rule in progression.values() {
            hasher.update(serde_json::to_vec(rule).unwrap_or_default());
        }

        for (community_id, rules) in communities {
            hasher.update(community_id.as_bytes());
            for rule in rules {
                hasher.update(serde_json::to_vec(rule).unwrap_or_default());
            }
        }

        hex::encode(hasher.finalize())
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Builder for [`RuleCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    progression: BTreeMap<(JourneyStage, JourneyStage), ProgressionRule>,
    communities: BTreeMap<String, Vec<CommunityInteractionRule>>,
}

impl CatalogBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded with the seed progression and default protection rules.
    pub fn seeded() -> Self {
        let mut builder = Self::new().with_seed_progression();
        builder
            .communities
            .insert(DEFAULT_COMMUNITY.to_string(), default_protection_rules());
        builder
    }

    /// Add the four canonical-path transitions.
    pub fn with_seed_progression(mut self) -> Self {
        for rule in seed_progression_rules() {
            self.progression.insert((rule.from_stage, rule.to_stage), rule);
        }
        self
    }

    /// Add or replace a progression rule.
    pub fn with_progression_rule(mut self, rule: ProgressionRule) -> Self {
        self.progression.insert((rule.from_stage, rule.to_stage), rule);
        self
    }

    /// Append protection rules to a community bucket.
    ///
    /// Rules keep their given order after any rules already present.
    pub fn with_community_rules(
        mut self,
        set: CommunityRuleSet,
    ) -> Result<Self, CatalogError> {
        let bucket = self.communities.entry(set.community_id.clone()).or_default();
        let mut seen: HashSet<String> = bucket.iter().map(|r| r.id.clone()).collect();

        for rule in set.rules {
            if rule.applicable_stages.is_empty() {
                return Err(CatalogError::EmptyStages(rule.id));
            }
            if !seen.insert(rule.id.clone()) {
                return Err(CatalogError::DuplicateRule {
                    community_id: set.community_id,
                    rule_id: rule.id,
                });
            }
            bucket.push(rule);
        }

        tracing::debug!(
            community_id = %set.community_id,
            rule_count = bucket.len(),
            "Community rules loaded"
        );

        Ok(self)
    }

    /// Append rule sets parsed from YAML.
    pub fn with_yaml(self, yaml: &str) -> Result<Self, CatalogError> {
        CommunityRuleSet::from_yaml(yaml)?
            .into_iter()
            .try_fold(self, |builder, set| builder.with_community_rules(set))
    }

    /// Freeze into a catalog.
    pub fn build(self) -> RuleCatalog {
        let fingerprint = RuleCatalog::compute_fingerprint(&self.progression, &self.communities);
        RuleCatalog {
            progression: self.progression,
            communities: self.communities,
            fingerprint,
        }
    }
}

fn tags(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The canonical-path transitions. No skip-stage or backward moves.
pub fn seed_progression_rules() -> Vec<ProgressionRule> {
    vec![
        ProgressionRule {
            from_stage: JourneyStage::Crisis,
            to_stage: JourneyStage::Stabilization,
            liberation_criteria: LiberationValues::new(0.65, 0.6, 0.8, 0.7),
            empowerment_requirements: tags(&[
                "safety_planning",
                "resource_connection",
                "community_support",
            ]),
            community_validation: true,
        },
        ProgressionRule {
            from_stage: JourneyStage::Stabilization,
            to_stage: JourneyStage::Growth,
            liberation_criteria: LiberationValues::new(0.7, 0.7, 0.75, 0.75),
            empowerment_requirements: tags(&[
                "skill_development",
                "peer_connection",
                "resource_stability",
            ]),
            community_validation: false,
        },
        ProgressionRule {
            from_stage: JourneyStage::Growth,
            to_stage: JourneyStage::CommunityHealing,
            liberation_criteria: LiberationValues::new(0.75, 0.8, 0.8, 0.8),
            empowerment_requirements: tags(&[
                "peer_support_capacity",
                "healing_knowledge",
                "community_trust",
            ]),
            community_validation: true,
        },
        ProgressionRule {
            from_stage: JourneyStage::CommunityHealing,
            to_stage: JourneyStage::Advocacy,
            liberation_criteria: LiberationValues::new(0.8, 0.9, 0.85, 0.85),
            empowerment_requirements: tags(&[
                "leadership_skills",
                "system_analysis",
                "movement_connection",
            ]),
            community_validation: true,
        },
    ]
}

/// Protection rules seeded into the [`DEFAULT_COMMUNITY`] bucket.
pub fn default_protection_rules() -> Vec<CommunityInteractionRule> {
    vec![
        CommunityInteractionRule {
            id: "default-safe-space".to_string(),
            name: "Trauma-Informed Safe Space".to_string(),
            description: "Interactions with members in early stages are moderated with trauma-informed care and consent-based sharing.".to_string(),
            applicable_stages: [
                JourneyStage::Crisis,
                JourneyStage::Stabilization,
                JourneyStage::Growth,
            ]
            .into_iter()
            .collect(),
            liberation_requirements: LiberationValues::new(0.8, 0.7, 0.85, 0.7),
            protection_mechanisms: strings(&[
                "trauma_informed_moderation",
                "consent_based_sharing",
            ]),
            empowerment_actions: strings(&["peer_support_matching", "resource_sharing"]),
        },
        CommunityInteractionRule {
            id: "default-collective-care".to_string(),
            name: "Collective Care Accountability".to_string(),
            description: "Members who hold community roles are accountable through restorative practice and active harassment enforcement.".to_string(),
            applicable_stages: [
                JourneyStage::Growth,
                JourneyStage::CommunityHealing,
                JourneyStage::Advocacy,
            ]
            .into_iter()
            .collect(),
            liberation_requirements: LiberationValues::new(0.75, 0.8, 0.8, 0.75),
            protection_mechanisms: strings(&[
                "restorative_accountability",
                "anti_harassment_enforcement",
            ]),
            empowerment_actions: strings(&["mentorship_pairing", "collective_decision_making"]),
        },
    ]
}
