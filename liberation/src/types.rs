//! Core value types for liberation-gated journeys.
//!
//! These types model the five liberation dimensions, the journey stages a
//! member moves through, and the rules that gate movement and interaction.
//!
//! With the `typescript` feature enabled, these types can be exported to TypeScript
//! using ts-rs for consistency with the frontend.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Journey stage a member occupies.
///
/// Ordered along the canonical path. The ordering is informational only:
/// which transitions exist is decided by the progression catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum JourneyStage {
    /// Immediate safety needs
    Crisis = 1,
    /// Regaining footing
    Stabilization = 2,
    /// Building skills and connection
    Growth = 3,
    /// Supporting others' healing
    CommunityHealing = 4,
    /// Leading systemic change
    Advocacy = 5,
}

impl JourneyStage {
    /// Get string representation (matches the serde form)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crisis => "crisis",
            Self::Stabilization => "stabilization",
            Self::Growth => "growth",
            Self::CommunityHealing => "community_healing",
            Self::Advocacy => "advocacy",
        }
    }

    /// All stages along the canonical path.
    pub fn canonical_path() -> [Self; 5] {
        [
            Self::Crisis,
            Self::Stabilization,
            Self::Growth,
            Self::CommunityHealing,
            Self::Advocacy,
        ]
    }

    /// Stages where members receive additional protection.
    pub fn is_vulnerable(&self) -> bool {
        matches!(self, Self::Crisis | Self::Stabilization)
    }
}

impl std::fmt::Display for JourneyStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five-dimensional score vector gating every decision.
///
/// Scalar dimensions are expected in `[0, 1]`; they are computed upstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct LiberationValues {
    /// Creator ownership of their own work and data
    pub creator_sovereignty: f64,
    /// Whether the action passed anti-oppression review
    pub anti_oppression_validation: bool,
    /// Empowerment of Black and queer members
    pub black_queer_empowerment: f64,
    /// Protection of the wider community
    pub community_protection: f64,
    /// Faithfulness to cultural context
    pub cultural_authenticity: f64,
}

impl LiberationValues {
    /// Build a vector with anti-oppression validation confirmed.
    pub fn new(
        creator_sovereignty: f64,
        black_queer_empowerment: f64,
        community_protection: f64,
        cultural_authenticity: f64,
    ) -> Self {
        Self {
            creator_sovereignty,
            anti_oppression_validation: true,
            black_queer_empowerment,
            community_protection,
            cultural_authenticity,
        }
    }

    /// Builder: set anti-oppression validation.
    pub fn with_anti_oppression(mut self, validated: bool) -> Self {
        self.anti_oppression_validation = validated;
        self
    }
}

/// Which dimension a violation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    CreatorSovereignty,
    AntiOppression,
    Empowerment,
    Protection,
    Authenticity,
}

/// How serious a violation is.
///
/// Only `Critical` violations make a validation result invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Major,
    Minor,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Major => "major",
            Self::Minor => "minor",
        }
    }
}

/// A dimension that fell below its minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Violation {
    pub kind: ViolationKind,
    pub severity: Severity,
    /// Actual vs. required value
    pub description: String,
    /// Fixed guidance for the dimension
    pub remedy: String,
}

/// Outcome of validating one values vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ValidationResult {
    /// True iff no violation is critical
    pub is_valid: bool,
    /// Every failing dimension, in dimension order
    pub violations: Vec<Violation>,
    /// Sum of weights of passing dimensions
    pub empowerment_score: f64,
    pub recommendations: Vec<String>,
}

impl ValidationResult {
    /// Violations of the given severity.
    pub fn violations_with(&self, severity: Severity) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.severity == severity)
    }

    /// Check whether a violation of this kind was raised.
    pub fn has_violation(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }
}

/// Criteria gating a single stage-to-stage transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ProgressionRule {
    pub from_stage: JourneyStage,
    pub to_stage: JourneyStage,
    /// Required values, validated like a member's own values
    pub liberation_criteria: LiberationValues,
    /// Capability tags the member is expected to hold (descriptive)
    pub empowerment_requirements: BTreeSet<String>,
    /// Whether the community must endorse the move
    pub community_validation: bool,
}

/// A community-scoped, stage-filtered protection rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct CommunityInteractionRule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub applicable_stages: BTreeSet<JourneyStage>,
    pub liberation_requirements: LiberationValues,
    pub protection_mechanisms: Vec<String>,
    pub empowerment_actions: Vec<String>,
}

impl CommunityInteractionRule {
    /// Check if this rule applies at a stage.
    pub fn applies_to(&self, stage: JourneyStage) -> bool {
        self.applicable_stages.contains(&stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_ordering() {
        let path = JourneyStage::canonical_path();
        assert!(path.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(path[0], JourneyStage::Crisis);
        assert_eq!(path[4], JourneyStage::Advocacy);
    }

    #[test]
    fn test_stage_string_forms() {
        for stage in JourneyStage::canonical_path() {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage.as_str()));
            let parsed: JourneyStage = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, stage);
        }
        assert!(serde_json::from_str::<JourneyStage>("\"elder\"").is_err());
    }

    #[test]
    fn test_vulnerable_stages() {
        assert!(JourneyStage::Crisis.is_vulnerable());
        assert!(JourneyStage::Stabilization.is_vulnerable());
        assert!(!JourneyStage::Growth.is_vulnerable());
        assert!(!JourneyStage::Advocacy.is_vulnerable());
    }

    #[test]
    fn test_values_builder() {
        let values = LiberationValues::new(0.8, 0.7, 0.7, 0.7).with_anti_oppression(false);
        assert!(!values.anti_oppression_validation);
        assert_eq!(values.creator_sovereignty, 0.8);
    }
}
