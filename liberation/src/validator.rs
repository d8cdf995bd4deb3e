//! Liberation-values validation.
//!
//! Compares each dimension of a [`LiberationValues`] vector against a fixed
//! minimum. Passing dimensions contribute their weight to the empowerment
//! score; failing ones produce a [`Violation`]. All five dimensions are always
//! evaluated so callers receive the complete diagnostic set.
//!
//! The same function validates member-submitted values and the required values
//! stored in rules, so output must be byte-for-byte reproducible.

use crate::types::{LiberationValues, Severity, ValidationResult, Violation, ViolationKind};

/// Minimum creator sovereignty.
pub const MIN_CREATOR_SOVEREIGNTY: f64 = 0.75;
/// Minimum Black/queer empowerment.
pub const MIN_BLACK_QUEER_EMPOWERMENT: f64 = 0.60;
/// Minimum community protection.
pub const MIN_COMMUNITY_PROTECTION: f64 = 0.70;
/// Minimum cultural authenticity.
pub const MIN_CULTURAL_AUTHENTICITY: f64 = 0.65;

/// Per-dimension weights. Dyadic fractions, so every partial sum is exact.
pub const WEIGHT_CREATOR_SOVEREIGNTY: f64 = 0.25;
pub const WEIGHT_ANTI_OPPRESSION: f64 = 0.25;
pub const WEIGHT_BLACK_QUEER_EMPOWERMENT: f64 = 0.25;
pub const WEIGHT_COMMUNITY_PROTECTION: f64 = 0.125;
pub const WEIGHT_CULTURAL_AUTHENTICITY: f64 = 0.125;

const CRITICAL_RECOMMENDATION: &str = "Resolve critical violations before proceeding";

/// Stateless validator for liberation values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuesValidator;

impl ValuesValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a values vector against the global minimums.
    pub fn validate(&self, values: &LiberationValues) -> ValidationResult {
        let mut violations = Vec::new();
        let mut empowerment_score = 0.0;

        if values.creator_sovereignty >= MIN_CREATOR_SOVEREIGNTY {
            empowerment_score += WEIGHT_CREATOR_SOVEREIGNTY;
        } else {
            violations.push(Violation {
                kind: ViolationKind::CreatorSovereignty,
                severity: Severity::Critical,
                description: below_minimum(
                    "Creator sovereignty",
                    values.creator_sovereignty,
                    MIN_CREATOR_SOVEREIGNTY,
                ),
                remedy: "Ensure creators retain ownership and control of their work".to_string(),
            });
        }

        if values.anti_oppression_validation {
            empowerment_score += WEIGHT_ANTI_OPPRESSION;
        } else {
            violations.push(Violation {
                kind: ViolationKind::AntiOppression,
                severity: Severity::Critical,
                description: "Anti-oppression validation is false (required: true)".to_string(),
                remedy: "Complete anti-oppression review before proceeding".to_string(),
            });
        }

        if values.black_queer_empowerment >= MIN_BLACK_QUEER_EMPOWERMENT {
            empowerment_score += WEIGHT_BLACK_QUEER_EMPOWERMENT;
        } else {
            violations.push(Violation {
                kind: ViolationKind::Empowerment,
                severity: Severity::Major,
                description: below_minimum(
                    "Black queer empowerment",
                    values.black_queer_empowerment,
                    MIN_BLACK_QUEER_EMPOWERMENT,
                ),
                remedy: "Center Black queer voices and leadership in this action".to_string(),
            });
        }

        if values.community_protection >= MIN_COMMUNITY_PROTECTION {
            empowerment_score += WEIGHT_COMMUNITY_PROTECTION;
        } else {
            violations.push(Violation {
                kind: ViolationKind::Protection,
                severity: Severity::Major,
                description: below_minimum(
                    "Community protection",
                    values.community_protection,
                    MIN_COMMUNITY_PROTECTION,
                ),
                remedy: "Add safety measures that protect community members".to_string(),
            });
        }

        if values.cultural_authenticity >= MIN_CULTURAL_AUTHENTICITY {
            empowerment_score += WEIGHT_CULTURAL_AUTHENTICITY;
        } else {
            violations.push(Violation {
                kind: ViolationKind::Authenticity,
                severity: Severity::Minor,
                description: below_minimum(
                    "Cultural authenticity",
                    values.cultural_authenticity,
                    MIN_CULTURAL_AUTHENTICITY,
                ),
                remedy: "Involve cultural stakeholders to ground the action in lived context"
                    .to_string(),
            });
        }

        let is_valid = !violations.iter().any(|v| v.severity == Severity::Critical);

        let mut recommendations: Vec<String> = violations
            .iter()
            .map(|v| format!("{}: {}", v.severity.as_str(), v.remedy))
            .collect();
        if !is_valid {
            recommendations.push(CRITICAL_RECOMMENDATION.to_string());
        }

        ValidationResult {
            is_valid,
            violations,
            empowerment_score,
            recommendations,
        }
    }
}

fn below_minimum(dimension: &str, actual: f64, required: f64) -> String {
    format!(
        "{} score {} is below the required {:.2}",
        dimension, actual, required
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing() -> LiberationValues {
        LiberationValues::new(0.8, 0.85, 0.9, 0.85)
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total = WEIGHT_CREATOR_SOVEREIGNTY
            + WEIGHT_ANTI_OPPRESSION
            + WEIGHT_BLACK_QUEER_EMPOWERMENT
            + WEIGHT_COMMUNITY_PROTECTION
            + WEIGHT_CULTURAL_AUTHENTICITY;
        assert_eq!(total, 1.0);
    }

    #[test]
    fn test_all_dimensions_pass() {
        let result = ValuesValidator::new().validate(&passing());
        assert!(result.is_valid);
        assert!(result.violations.is_empty());
        assert!(result.recommendations.is_empty());
        assert_eq!(result.empowerment_score, 1.0);
    }

    #[test]
    fn test_creator_sovereignty_boundary() {
        let validator = ValuesValidator::new();

        let mut values = passing();
        values.creator_sovereignty = 0.75;
        let result = validator.validate(&values);
        assert!(result.is_valid);
        assert!(!result.has_violation(ViolationKind::CreatorSovereignty));

        values.creator_sovereignty = 0.7499;
        let result = validator.validate(&values);
        assert!(!result.is_valid);
        let violation = &result.violations[0];
        assert_eq!(violation.kind, ViolationKind::CreatorSovereignty);
        assert_eq!(violation.severity, Severity::Critical);
        assert_eq!(
            violation.description,
            "Creator sovereignty score 0.7499 is below the required 0.75"
        );
    }

    #[test]
    fn test_descriptions_show_gap_below_minimum() {
        let values = LiberationValues::new(0.8, 0.5999, 0.6999, 0.6499);
        let result = ValuesValidator::new().validate(&values);
        let descriptions: Vec<&str> = result
            .violations
            .iter()
            .map(|v| v.description.as_str())
            .collect();
        assert_eq!(
            descriptions,
            vec![
                "Black queer empowerment score 0.5999 is below the required 0.60",
                "Community protection score 0.6999 is below the required 0.70",
                "Cultural authenticity score 0.6499 is below the required 0.65",
            ]
        );
        assert_eq!(result.violations[0].severity, Severity::Major);
    }

    #[test]
    fn test_anti_oppression_is_critical() {
        let values = passing().with_anti_oppression(false);
        let result = ValuesValidator::new().validate(&values);
        assert!(!result.is_valid);
        assert!(result.has_violation(ViolationKind::AntiOppression));
        assert_eq!(result.empowerment_score, 1.0 - WEIGHT_ANTI_OPPRESSION);
        assert_eq!(
            result.recommendations.last().map(String::as_str),
            Some(CRITICAL_RECOMMENDATION)
        );
    }

    #[test]
    fn test_non_critical_violations_keep_validity() {
        let values = LiberationValues::new(0.9, 0.1, 0.1, 0.1);
        let result = ValuesValidator::new().validate(&values);
        assert!(result.is_valid);
        assert_eq!(result.violations.len(), 3);
        assert_eq!(result.violations_with(Severity::Major).count(), 2);
        assert_eq!(result.violations_with(Severity::Minor).count(), 1);
        assert_eq!(result.empowerment_score, 0.5);
        assert_eq!(result.recommendations.len(), 3);
    }

    #[test]
    fn test_violations_accumulate_in_dimension_order() {
        let values = LiberationValues::new(0.0, 0.0, 0.0, 0.0).with_anti_oppression(false);
        let result = ValuesValidator::new().validate(&values);
        let kinds: Vec<_> = result.violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::CreatorSovereignty,
                ViolationKind::AntiOppression,
                ViolationKind::Empowerment,
                ViolationKind::Protection,
                ViolationKind::Authenticity,
            ]
        );
        assert_eq!(result.empowerment_score, 0.0);
    }

    #[test]
    fn test_score_matches_passing_weights() {
        let validator = ValuesValidator::new();
        let samples = [0.0, 0.5, 0.6, 0.65, 0.7, 0.75, 0.8, 1.0];

        for &cs in &samples {
            for &bq in &samples {
                for &ca in &samples {
                    for ao in [true, false] {
                        let values =
                            LiberationValues::new(cs, bq, 0.7, ca).with_anti_oppression(ao);
                        let result = validator.validate(&values);

                        let mut expected = WEIGHT_COMMUNITY_PROTECTION;
                        if cs >= MIN_CREATOR_SOVEREIGNTY {
                            expected += WEIGHT_CREATOR_SOVEREIGNTY;
                        }
                        if ao {
                            expected += WEIGHT_ANTI_OPPRESSION;
                        }
                        if bq >= MIN_BLACK_QUEER_EMPOWERMENT {
                            expected += WEIGHT_BLACK_QUEER_EMPOWERMENT;
                        }
                        if ca >= MIN_CULTURAL_AUTHENTICITY {
                            expected += WEIGHT_CULTURAL_AUTHENTICITY;
                        }
                        assert_eq!(result.empowerment_score, expected);
                        assert_eq!(result.is_valid, cs >= MIN_CREATOR_SOVEREIGNTY && ao);
                    }
                }
            }
        }
    }

    #[test]
    fn test_validation_is_deterministic() {
        let values = LiberationValues::new(0.3, 0.4, 0.5, 0.6).with_anti_oppression(false);
        let validator = ValuesValidator::new();
        assert_eq!(validator.validate(&values), validator.validate(&values));
    }
}
