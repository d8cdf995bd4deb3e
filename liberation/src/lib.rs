//! Liberation values and rule catalogs for community journeys.
//!
//! This crate holds the pure, synchronous half of journey evaluation:
//!
//! - **Values**: the five-dimensional [`LiberationValues`] vector
//! - **Validation**: [`ValuesValidator`] turns a vector into pass/fail plus a
//!   weighted empowerment score
//! - **Catalog**: [`RuleCatalog`] holds progression rules keyed by transition
//!   and protection rules keyed by community
//! - **Stages**: per-stage opportunity tags and the interaction-impact formula
//!
//! # Example
//!
//! ```
//! use liberation::{LiberationValues, ValuesValidator};
//!
//! let values = LiberationValues::new(0.8, 0.85, 0.9, 0.85);
//! let result = ValuesValidator::new().validate(&values);
//! assert!(result.is_valid);
//! assert_eq!(result.empowerment_score, 1.0);
//! ```

pub mod catalog;
pub mod stages;
pub mod types;
pub mod validator;

// Re-export main types
pub use catalog::{CatalogBuilder, CatalogError, CommunityRuleSet, RuleCatalog, DEFAULT_COMMUNITY};
pub use stages::{interaction_impact, stage_multiplier, stage_opportunities};
pub use types::*;
pub use validator::ValuesValidator;
