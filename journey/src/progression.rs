//! Progression engine.
//!
//! Gates movement between journey stages. A transition is allowed only when
//! all four gates pass:
//!
//! 1. **Readiness**: the rule's own criteria and the member's values both
//!    score high enough
//! 2. **Community validation**: the community endorses the move, when the rule
//!    asks for it
//! 3. **Empowerment**: the member's empowerment and protection scores meet the
//!    fixed thresholds
//! 4. **Validity**: the member's values carry no critical violation
//!
//! The rule's empowerment-requirement tags are not checked against member
//! capability records; the two-threshold check stands in for them.

use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use liberation::{JourneyStage, LiberationValues, ProgressionRule, RuleCatalog, ValuesValidator};

use crate::config::ProgressionConfig;
use crate::oracle::CommunitySupportOracle;
use crate::types::{JourneyContext, JourneyError, ProgressionResult, Result};

const EMPOWERMENT_MIN: f64 = 0.6;
const PROTECTION_MIN: f64 = 0.7;

/// Evaluates stage transitions against the progression catalog.
pub struct ProgressionEngine {
    catalog: Arc<RuleCatalog>,
    oracle: Arc<dyn CommunitySupportOracle>,
    validator: ValuesValidator,
    config: ProgressionConfig,
}

impl ProgressionEngine {
    /// Create an engine with default gate configuration.
    pub fn new(catalog: Arc<RuleCatalog>, oracle: Arc<dyn CommunitySupportOracle>) -> Self {
        Self::with_config(catalog, oracle, ProgressionConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(
        catalog: Arc<RuleCatalog>,
        oracle: Arc<dyn CommunitySupportOracle>,
        config: ProgressionConfig,
    ) -> Self {
        Self {
            catalog,
            oracle,
            validator: ValuesValidator::new(),
            config,
        }
    }

    /// Attempt to move a member from one stage to another.
    ///
    /// Fails only when the catalog has no rule for the pair.
    pub async fn attempt_progression(
        &self,
        member_id: &str,
        from: JourneyStage,
        to: JourneyStage,
        context: &JourneyContext,
        values: &LiberationValues,
    ) -> Result<ProgressionResult> {
        let start = Instant::now();

        let rule = self
            .catalog
            .progression_rule(from, to)
            .ok_or(JourneyError::NoProgressionRule { from, to })?;

        let criteria_result = self.validator.validate(&rule.liberation_criteria);
        let member_result = self.validator.validate(values);

        let readiness = criteria_result.empowerment_score >= self.config.criteria_readiness_min
            && member_result.empowerment_score >= self.config.member_readiness_min;

        let community_validation_passed = if rule.community_validation {
            self.community_support(member_id, rule, context).await
        } else {
            true
        };

        let empowerment_met = empowerment_met(values);

        let allowed =
            readiness && community_validation_passed && empowerment_met && member_result.is_valid;

        info!(
            member_id = %member_id,
            from = %from,
            to = %to,
            allowed = allowed,
            readiness = readiness,
            community_validation = community_validation_passed,
            empowerment_met = empowerment_met,
            duration_ms = start.elapsed().as_millis() as u64,
            "Progression evaluated"
        );

        Ok(ProgressionResult {
            allowed,
            rule: rule.clone(),
            readiness,
            community_validation_passed,
            empowerment_met,
            validation: member_result,
        })
    }

    /// Ask the oracle, treating errors and timeouts as "not supported".
    async fn community_support(
        &self,
        member_id: &str,
        rule: &ProgressionRule,
        context: &JourneyContext,
    ) -> bool {
        let call = self.oracle.is_supported(member_id, rule, context);

        match tokio::time::timeout(self.config.oracle_timeout(), call).await {
            Ok(Ok(supported)) => supported,
            Ok(Err(e)) => {
                warn!(
                    member_id = %member_id,
                    error = %e,
                    "Community support check failed"
                );
                false
            }
            Err(_) => {
                warn!(
                    member_id = %member_id,
                    timeout_ms = self.config.oracle_timeout_ms,
                    "Community support check timed out"
                );
                false
            }
        }
    }
}

/// Fixed two-threshold empowerment gate.
pub fn empowerment_met(values: &LiberationValues) -> bool {
    values.black_queer_empowerment >= EMPOWERMENT_MIN
        && values.community_protection >= PROTECTION_MIN
}
