//! Protection engine.
//!
//! Matches a community's protection rules against the member's current stage,
//! accumulates their mitigations and decides whether the interaction may go
//! ahead. Each applicable rule's required values are validated against the
//! global minimums; a rule whose own requirements fail blocks the interaction.
//! The member's values are checked separately by the orchestrator.

use std::sync::Arc;
use tracing::{debug, warn};

use liberation::stages::BLOCKED_IMPACT;
use liberation::{
    stage_opportunities, JourneyStage, LiberationValues, RuleCatalog, ValuesValidator,
};

use crate::types::ProtectionDecision;

/// Protection measures added at vulnerable stages.
pub const VULNERABLE_STAGE_MEASURES: [&str; 2] = [
    "vulnerable_stage_extra_protection",
    "community_support_notification",
];

/// Opportunity added when Black/queer empowerment is high.
pub const EMPOWERMENT_BONUS: &str = "black_queer_leadership_pathway";
/// Opportunity added when creator sovereignty is high.
pub const SOVEREIGNTY_BONUS: &str = "creator_ownership_opportunity";

const BONUS_THRESHOLD: f64 = 0.8;
const ALLOWED_IMPACT: f64 = 0.7;

/// Decides allow/deny for community interactions.
pub struct ProtectionEngine {
    catalog: Arc<RuleCatalog>,
    validator: ValuesValidator,
}

impl ProtectionEngine {
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self {
            catalog,
            validator: ValuesValidator::new(),
        }
    }

    /// Decide on an interaction at a stage.
    pub fn decide(
        &self,
        member_id: &str,
        community_id: &str,
        interaction_type: &str,
        stage: JourneyStage,
        values: &LiberationValues,
    ) -> ProtectionDecision {
        let mut allow = true;
        let mut failures: Vec<String> = Vec::new();
        let mut protection_measures: Vec<String> = Vec::new();
        let mut applicable = 0usize;

        for rule in self
            .catalog
            .community_rules(community_id)
            .iter()
            .filter(|r| r.applies_to(stage))
        {
            applicable += 1;
            protection_measures.extend(rule.protection_mechanisms.iter().cloned());

            let result = self.validator.validate(&rule.liberation_requirements);
            if result.is_valid {
                debug!(rule_id = %rule.id, stage = %stage, "Protection rule satisfied");
                continue;
            }

            allow = false;
            let details: Vec<&str> = result
                .violations
                .iter()
                .map(|v| v.description.as_str())
                .collect();
            failures.push(format!(
                "Rule '{}' ({}) failed liberation requirements: {}",
                rule.name,
                rule.id,
                details.join("; ")
            ));
            warn!(
                member_id = %member_id,
                community_id = %community_id,
                rule_id = %rule.id,
                "Protection rule blocked interaction"
            );
        }

        if stage.is_vulnerable() {
            protection_measures.extend(VULNERABLE_STAGE_MEASURES.iter().map(|s| s.to_string()));
        }

        let reasoning = if !failures.is_empty() {
            failures.join("\n")
        } else if applicable == 0 {
            format!(
                "No protection rules for community '{}' apply at stage {}",
                community_id, stage
            )
        } else {
            format!(
                "All {} applicable protection rules satisfied for {} at stage {}",
                applicable, interaction_type, stage
            )
        };

        ProtectionDecision {
            allow,
            reasoning,
            protection_measures,
            empowerment_opportunities: identify_empowerment_opportunities(stage, values),
            liberation_impact: if allow { ALLOWED_IMPACT } else { BLOCKED_IMPACT },
        }
    }
}

/// Stage opportunities plus bonuses earned by the member's own values.
pub fn identify_empowerment_opportunities(
    stage: JourneyStage,
    values: &LiberationValues,
) -> Vec<String> {
    let mut opportunities: Vec<String> = stage_opportunities(stage)
        .iter()
        .map(|s| s.to_string())
        .collect();

    if values.black_queer_empowerment >= BONUS_THRESHOLD {
        opportunities.push(EMPOWERMENT_BONUS.to_string());
    }
    if values.creator_sovereignty >= BONUS_THRESHOLD {
        opportunities.push(SOVEREIGNTY_BONUS.to_string());
    }

    opportunities
}

#[cfg(test)]
mod tests {
    use super::*;
    use liberation::{CatalogBuilder, CommunityInteractionRule, CommunityRuleSet, DEFAULT_COMMUNITY};

    fn low_values() -> LiberationValues {
        LiberationValues::new(0.5, 0.5, 0.5, 0.5)
    }

    fn engine_with(rules: Vec<CommunityInteractionRule>) -> ProtectionEngine {
        let catalog = CatalogBuilder::seeded()
            .with_community_rules(CommunityRuleSet::new("test-community", rules))
            .unwrap()
            .build();
        ProtectionEngine::new(Arc::new(catalog))
    }

    fn rule(id: &str, stages: &[JourneyStage], requirements: LiberationValues) -> CommunityInteractionRule {
        CommunityInteractionRule {
            id: id.to_string(),
            name: format!("Rule {}", id),
            description: "test rule".to_string(),
            applicable_stages: stages.iter().copied().collect(),
            liberation_requirements: requirements,
            protection_mechanisms: vec![format!("{}_mechanism", id)],
            empowerment_actions: vec![],
        }
    }

    #[test]
    fn test_default_rules_allow() {
        let engine = ProtectionEngine::new(Arc::new(RuleCatalog::seeded()));
        let decision = engine.decide(
            "member-1",
            DEFAULT_COMMUNITY,
            "post",
            JourneyStage::Growth,
            &low_values(),
        );

        assert!(decision.allow);
        assert_eq!(decision.liberation_impact, 0.7);
        // Both default rules apply at growth
        assert_eq!(decision.protection_measures.len(), 4);
        assert!(decision
            .protection_measures
            .contains(&"restorative_accountability".to_string()));
    }

    #[test]
    fn test_vulnerable_stage_measures_regardless_of_outcome() {
        let engine = engine_with(vec![rule(
            "weak",
            &[JourneyStage::Crisis],
            LiberationValues::new(0.1, 0.9, 0.9, 0.9),
        )]);

        for community in ["test-community", DEFAULT_COMMUNITY, "unknown"] {
            let decision =
                engine.decide("member-1", community, "message", JourneyStage::Crisis, &low_values());
            for measure in VULNERABLE_STAGE_MEASURES {
                assert!(decision.protection_measures.contains(&measure.to_string()));
            }
        }
    }

    #[test]
    fn test_rule_self_validation_blocks() {
        let engine = engine_with(vec![
            rule("weak", &[JourneyStage::Growth], LiberationValues::new(0.1, 0.9, 0.9, 0.9)),
            rule("strong", &[JourneyStage::Growth], LiberationValues::new(0.9, 0.9, 0.9, 0.9)),
        ]);

        // Member values are high; the rule's own requirements are what fail.
        let high = LiberationValues::new(0.95, 0.95, 0.95, 0.95);
        let decision = engine.decide("member-1", "test-community", "post", JourneyStage::Growth, &high);

        assert!(!decision.allow);
        assert_eq!(decision.liberation_impact, 0.2);
        assert!(decision.reasoning.contains("'Rule weak' (weak)"));
        assert!(!decision.reasoning.contains("strong"));
        // Mechanisms are still accumulated for every applicable rule, in order
        assert_eq!(
            decision.protection_measures,
            vec!["weak_mechanism".to_string(), "strong_mechanism".to_string()]
        );
    }

    #[test]
    fn test_stage_filter() {
        let engine = engine_with(vec![rule(
            "weak",
            &[JourneyStage::Advocacy],
            LiberationValues::new(0.1, 0.9, 0.9, 0.9),
        )]);

        let decision =
            engine.decide("member-1", "test-community", "post", JourneyStage::Growth, &low_values());
        assert!(decision.allow);
        assert!(decision.protection_measures.is_empty());
        assert!(decision.reasoning.starts_with("No protection rules"));
    }

    #[test]
    fn test_unknown_community_is_not_an_error() {
        let engine = ProtectionEngine::new(Arc::new(RuleCatalog::seeded()));
        let decision =
            engine.decide("member-1", "nowhere", "post", JourneyStage::Advocacy, &low_values());
        assert!(decision.allow);
        assert!(decision.protection_measures.is_empty());
    }

    #[test]
    fn test_opportunities_superset_of_stage_table() {
        let samples = [
            low_values(),
            LiberationValues::new(0.9, 0.9, 0.9, 0.9),
            LiberationValues::new(0.8, 0.2, 0.2, 0.2),
        ];
        for stage in JourneyStage::canonical_path() {
            for values in &samples {
                let opportunities = identify_empowerment_opportunities(stage, values);
                for tag in stage_opportunities(stage) {
                    assert!(opportunities.iter().any(|o| o == tag));
                }
            }
        }
    }

    #[test]
    fn test_bonus_opportunities() {
        let values = LiberationValues::new(0.8, 0.8, 0.5, 0.5);
        let opportunities = identify_empowerment_opportunities(JourneyStage::Growth, &values);
        assert!(opportunities.contains(&EMPOWERMENT_BONUS.to_string()));
        assert!(opportunities.contains(&SOVEREIGNTY_BONUS.to_string()));

        let opportunities = identify_empowerment_opportunities(JourneyStage::Growth, &low_values());
        assert_eq!(opportunities.len(), 3);
    }
}
