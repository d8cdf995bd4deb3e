//! Democratic-participation scoring.

use tracing::debug;

use liberation::{LiberationValues, ValuesValidator};

use crate::types::{JourneyContext, ParticipationResult};

const MIN_PARTICIPATION_SCORE: f64 = 0.6;
const MIN_LIBERATION_ALIGNMENT: f64 = 0.7;

/// Accessibility measures offered for every participation event.
pub const ACCESSIBILITY_MEASURES: [&str; 3] = [
    "sliding_scale_participation",
    "multilingual_materials",
    "remote_participation_option",
];

/// Scores a member's participation in a democratic process.
#[derive(Debug, Clone, Default)]
pub struct ParticipationEvaluator {
    validator: ValuesValidator,
}

impl ParticipationEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a participation event.
    pub fn evaluate(
        &self,
        participant_id: &str,
        participation_type: &str,
        context: &JourneyContext,
        values: &LiberationValues,
    ) -> ParticipationResult {
        let bq = values.black_queer_empowerment;
        let cp = values.community_protection;
        let ca = values.cultural_authenticity;

        let participation_score = 0.4 * bq + 0.3 * cp + 0.3 * ca;
        let empowerment_level = participation_score * bq;
        let liberation_alignment = (bq + cp + ca) / 3.0;

        let values_valid = self.validator.validate(values).is_valid;
        let is_valid = participation_score >= MIN_PARTICIPATION_SCORE
            && liberation_alignment >= MIN_LIBERATION_ALIGNMENT
            && values_valid;

        debug!(
            participant_id = %participant_id,
            participation_type = %participation_type,
            community_id = ?context.community_id,
            score = participation_score,
            alignment = liberation_alignment,
            is_valid = is_valid,
            "Participation evaluated"
        );

        ParticipationResult {
            is_valid,
            participation_score,
            empowerment_level,
            accessibility_measures: ACCESSIBILITY_MEASURES.iter().map(|s| s.to_string()).collect(),
            liberation_alignment,
        }
    }
}
