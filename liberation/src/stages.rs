//! Stage lookup tables.
//!
//! Static per-stage data shared by the protection and progression engines:
//! the empowerment opportunities open at each stage and the multiplier used by
//! the interaction-impact formula.

use crate::types::{JourneyStage, LiberationValues};

/// Impact reported for a blocked interaction.
pub const BLOCKED_IMPACT: f64 = 0.2;

/// Multiplier used when the stage could not be resolved.
pub const DEFAULT_STAGE_MULTIPLIER: f64 = 0.6;

/// Empowerment opportunities available at a stage.
pub fn stage_opportunities(stage: JourneyStage) -> &'static [&'static str] {
    match stage {
        JourneyStage::Crisis => &[
            "peer_support_connection",
            "resource_navigation",
            "safety_planning",
        ],
        JourneyStage::Stabilization => &[
            "skill_building",
            "community_integration",
            "resource_development",
        ],
        JourneyStage::Growth => &[
            "leadership_development",
            "peer_mentoring",
            "advocacy_training",
        ],
        JourneyStage::CommunityHealing => &[
            "healing_facilitation",
            "community_support",
            "knowledge_sharing",
        ],
        JourneyStage::Advocacy => &[
            "movement_leadership",
            "system_change",
            "community_organizing",
        ],
    }
}

/// Impact scaling per stage.
pub fn stage_multiplier(stage: Option<JourneyStage>) -> f64 {
    match stage {
        Some(JourneyStage::Crisis) => 0.8,
        Some(JourneyStage::Stabilization) => 0.7,
        Some(JourneyStage::Growth) => 0.9,
        Some(JourneyStage::CommunityHealing) => 1.0,
        Some(JourneyStage::Advocacy) => 1.0,
        None => DEFAULT_STAGE_MULTIPLIER,
    }
}

/// Liberation impact of an interaction.
///
/// Blocked interactions score [`BLOCKED_IMPACT`]; allowed ones scale the
/// member's empowerment and protection by the stage multiplier, capped at 1.0.
pub fn interaction_impact(
    allowed: bool,
    values: &LiberationValues,
    stage: Option<JourneyStage>,
) -> f64 {
    if !allowed {
        return BLOCKED_IMPACT;
    }

    let base = 0.5 + 0.3 * values.black_queer_empowerment + 0.2 * values.community_protection;
    (base * stage_multiplier(stage)).min(1.0)
}
