//! Core types for journey evaluation.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use liberation::{CatalogError, JourneyStage, ProgressionRule, ValidationResult};

/// Accessibility needs a member or event declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(default)]
pub struct AccessibilityNeeds {
    pub wheelchair_access: bool,
    pub sign_language: bool,
    pub screen_reader: bool,
    pub childcare: bool,
}

/// Cost support flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(default)]
pub struct CostFlags {
    /// No cost to participate
    pub free: bool,
    /// Pay-what-you-can pricing
    pub sliding_scale: bool,
    /// Travel costs covered
    pub transportation_support: bool,
}

/// Typed context accompanying progression and participation requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(default)]
pub struct JourneyContext {
    /// Community the request happens in
    pub community_id: Option<String>,
    /// Free-form location
    pub location: Option<String>,
    pub accessibility: AccessibilityNeeds,
    pub cost: CostFlags,
}

impl JourneyContext {
    /// Context scoped to a community.
    pub fn for_community(community_id: impl Into<String>) -> Self {
        Self {
            community_id: Some(community_id.into()),
            ..Default::default()
        }
    }

    /// Builder: set location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder: set accessibility needs.
    pub fn with_accessibility(mut self, accessibility: AccessibilityNeeds) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Builder: set cost flags.
    pub fn with_cost(mut self, cost: CostFlags) -> Self {
        self.cost = cost;
        self
    }
}

/// Allow/deny decision for an interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ProtectionDecision {
    pub allow: bool,
    /// One line per failing rule, or a summary line
    pub reasoning: String,
    /// Accumulated mitigations; may repeat
    pub protection_measures: Vec<String>,
    pub empowerment_opportunities: Vec<String>,
    /// Coarse impact: 0.7 allowed, 0.2 blocked
    pub liberation_impact: f64,
}

/// Result of an orchestrated interaction check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct InteractionOutcome {
    /// Engine decision
    pub decision: ProtectionDecision,
    /// Validation of the member's own values
    pub validation: ValidationResult,
    /// `decision.allow && validation.is_valid`
    pub is_valid: bool,
    /// Stage-scaled impact
    pub impact: f64,
}

/// Result of a progression attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ProgressionResult {
    pub allowed: bool,
    /// Rule that gated the transition
    pub rule: ProgressionRule,
    pub readiness: bool,
    pub community_validation_passed: bool,
    pub empowerment_met: bool,
    /// Validation of the member's own values
    pub validation: ValidationResult,
}

/// Result of evaluating a democratic-participation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ParticipationResult {
    pub is_valid: bool,
    pub participation_score: f64,
    pub empowerment_level: f64,
    pub accessibility_measures: Vec<String>,
    pub liberation_alignment: f64,
}

/// Error types for journey evaluation.
///
/// Rejections are data, not errors; only a missing transition is fatal.
#[derive(Debug, thiserror::Error)]
pub enum JourneyError {
    /// No catalog entry for the requested transition
    #[error("No progression rule from {from} to {to}")]
    NoProgressionRule { from: JourneyStage, to: JourneyStage },

    /// Catalog could not be assembled
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, JourneyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let context = JourneyContext::for_community("riverside")
            .with_location("Oakland")
            .with_cost(CostFlags {
                sliding_scale: true,
                ..Default::default()
            });
        assert_eq!(context.community_id.as_deref(), Some("riverside"));
        assert_eq!(context.location.as_deref(), Some("Oakland"));
        assert!(context.cost.sliding_scale);
        assert!(!context.accessibility.screen_reader);
    }

    #[test]
    fn test_context_accepts_partial_json() {
        let context: JourneyContext =
            serde_json::from_str(r#"{"accessibility": {"sign_language": true}}"#).unwrap();
        assert!(context.accessibility.sign_language);
        assert!(context.community_id.is_none());
    }

    #[test]
    fn test_context_rejects_wrong_types() {
        let parsed: std::result::Result<JourneyContext, _> =
            serde_json::from_str(r#"{"location": 42}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_no_rule_message() {
        let err = JourneyError::NoProgressionRule {
            from: JourneyStage::Crisis,
            to: JourneyStage::Growth,
        };
        assert_eq!(err.to_string(), "No progression rule from crisis to growth");
    }
}
