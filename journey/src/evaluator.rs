//! JourneyEvaluator - the orchestration entry point.
//!
//! Builds the rule catalog once, injects it into each engine and exposes the
//! three evaluation contracts:
//!
//! - [`JourneyEvaluator::validate_interaction`]
//! - [`JourneyEvaluator::progress_journey`]
//! - [`JourneyEvaluator::evaluate_participation`]

use std::sync::Arc;
use tracing::{info, warn};

use liberation::{
    interaction_impact, CatalogBuilder, JourneyStage, LiberationValues, RuleCatalog,
    ValuesValidator,
};

use crate::audit::{AuditEntry, AuditLog, AuditOutcome, EvaluationKind};
use crate::config::JourneyConfig;
use crate::oracle::{AlwaysSupported, CommunitySupportOracle};
use crate::participation::ParticipationEvaluator;
use crate::progression::ProgressionEngine;
use crate::protection::ProtectionEngine;
use crate::sources::{RuleSource, YamlRuleSource};
use crate::types::{
    InteractionOutcome, JourneyContext, ParticipationResult, ProgressionResult, Result,
};

/// Orchestrates protection, progression and participation evaluation.
///
/// All engines share one immutable catalog; evaluations are independent and
/// can run concurrently from many tasks.
pub struct JourneyEvaluator {
    config: JourneyConfig,
    catalog: Arc<RuleCatalog>,
    validator: ValuesValidator,
    protection: ProtectionEngine,
    progression: ProgressionEngine,
    participation: ParticipationEvaluator,
    audit: Option<AuditLog>,
}

impl JourneyEvaluator {
    /// Create a builder.
    pub fn builder() -> JourneyEvaluatorBuilder {
        JourneyEvaluatorBuilder::new()
    }

    /// Get evaluator ID.
    pub fn id(&self) -> &str {
        &self.config.evaluator_id
    }

    /// The shared rule catalog.
    pub fn catalog(&self) -> &Arc<RuleCatalog> {
        &self.catalog
    }

    /// Audit log, when auditing is enabled.
    pub fn audit(&self) -> Option<&AuditLog> {
        self.audit.as_ref()
    }

    /// Check an interaction against community protection rules and the
    /// member's own values.
    pub async fn validate_interaction(
        &self,
        member_id: &str,
        community_id: &str,
        interaction_type: &str,
        stage: JourneyStage,
        values: &LiberationValues,
    ) -> InteractionOutcome {
        let decision =
            self.protection
                .decide(member_id, community_id, interaction_type, stage, values);
        let validation = self.validator.validate(values);
        let is_valid = decision.allow && validation.is_valid;
        let impact = interaction_impact(is_valid, values, Some(stage));

        info!(
            member_id = %member_id,
            community_id = %community_id,
            interaction_type = %interaction_type,
            stage = %stage,
            allow = decision.allow,
            is_valid = is_valid,
            "Interaction evaluated"
        );

        self.record(
            EvaluationKind::Interaction,
            member_id,
            if is_valid {
                AuditOutcome::Allowed
            } else {
                AuditOutcome::Denied
            },
            format!("{} in {} at {}", interaction_type, community_id, stage),
        )
        .await;

        InteractionOutcome {
            decision,
            validation,
            is_valid,
            impact,
        }
    }

    /// Attempt a stage transition.
    ///
    /// Fails with [`JourneyError::NoProgressionRule`](crate::JourneyError::NoProgressionRule)
    /// when the catalog has no rule for the pair.
    pub async fn progress_journey(
        &self,
        member_id: &str,
        from: JourneyStage,
        to: JourneyStage,
        context: &JourneyContext,
        values: &LiberationValues,
    ) -> Result<ProgressionResult> {
        let summary = format!("{} -> {}", from, to);
        let result = self
            .progression
            .attempt_progression(member_id, from, to, context, values)
            .await;

        let outcome = match &result {
            Ok(r) if r.allowed => AuditOutcome::Allowed,
            Ok(_) => AuditOutcome::Denied,
            Err(e) => AuditOutcome::Failed(e.to_string()),
        };
        self.record(EvaluationKind::Progression, member_id, outcome, summary)
            .await;

        result
    }

    /// Score a democratic-participation event.
    pub async fn evaluate_participation(
        &self,
        participant_id: &str,
        participation_type: &str,
        context: &JourneyContext,
        values: &LiberationValues,
    ) -> ParticipationResult {
        let result =
            self.participation
                .evaluate(participant_id, participation_type, context, values);

        self.record(
            EvaluationKind::Participation,
            participant_id,
            if result.is_valid {
                AuditOutcome::Allowed
            } else {
                AuditOutcome::Denied
            },
            participation_type,
        )
        .await;

        result
    }

    async fn record(
        &self,
        kind: EvaluationKind,
        subject_id: &str,
        outcome: AuditOutcome,
        summary: impl Into<String>,
    ) {
        if let Some(audit) = &self.audit {
            audit
                .record(AuditEntry::new(
                    kind,
                    subject_id,
                    outcome,
                    summary,
                    self.catalog.fingerprint(),
                ))
                .await;
        }
    }
}

/// Builder for [`JourneyEvaluator`].
pub struct JourneyEvaluatorBuilder {
    config: JourneyConfig,
    catalog: Option<RuleCatalog>,
    oracle: Option<Arc<dyn CommunitySupportOracle>>,
    sources: Vec<Box<dyn RuleSource>>,
}

impl JourneyEvaluatorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: JourneyConfig::default(),
            catalog: None,
            oracle: None,
            sources: Vec::new(),
        }
    }

    /// Set configuration.
    pub fn with_config(mut self, config: JourneyConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a prebuilt catalog instead of assembling one from sources.
    pub fn with_catalog(mut self, catalog: RuleCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the community-support oracle.
    pub fn with_oracle(mut self, oracle: Arc<dyn CommunitySupportOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Add a source of community rules.
    pub fn with_rule_source(mut self, source: impl RuleSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Build the evaluator, loading every rule source.
    pub async fn build(mut self) -> Result<JourneyEvaluator> {
        self.config.validate()?;

        let catalog = match self.catalog.take() {
            Some(catalog) => {
                if !self.sources.is_empty() || self.config.catalog.rules_path.is_some() {
                    warn!("Prebuilt catalog supplied; ignoring configured rule sources");
                }
                catalog
            }
            None => self.assemble_catalog().await?,
        };
        let catalog = Arc::new(catalog);

        let oracle: Arc<dyn CommunitySupportOracle> = match self.oracle {
            Some(oracle) => oracle,
            None => Arc::new(AlwaysSupported),
        };

        let audit = self
            .config
            .general
            .audit_enabled
            .then(|| AuditLog::with_max_entries(self.config.general.audit_max_entries));

        info!(
            evaluator_id = %self.config.evaluator_id,
            catalog_fingerprint = %catalog.fingerprint(),
            communities = catalog.communities().count(),
            "JourneyEvaluator initialized"
        );

        Ok(JourneyEvaluator {
            protection: ProtectionEngine::new(catalog.clone()),
            progression: ProgressionEngine::with_config(
                catalog.clone(),
                oracle,
                self.config.progression.clone(),
            ),
            participation: ParticipationEvaluator::new(),
            validator: ValuesValidator::new(),
            catalog,
            audit,
            config: self.config,
        })
    }

    async fn assemble_catalog(&mut self) -> Result<RuleCatalog> {
        let mut builder = if self.config.catalog.include_default_rules {
            CatalogBuilder::seeded()
        } else {
            CatalogBuilder::new().with_seed_progression()
        };

        if let Some(path) = &self.config.catalog.rules_path {
            self.sources.push(Box::new(YamlRuleSource::new(path)));
        }

        for source in &self.sources {
            let sets = source.load().await?;
            info!(source = %source.name(), rule_sets = sets.len(), "Rule source loaded");
            for set in sets {
                builder = builder.with_community_rules(set)?;
            }
        }

        Ok(builder.build())
    }
}

impl Default for JourneyEvaluatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
