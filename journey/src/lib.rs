//! Journey evaluation for liberation-gated communities.
//!
//! Gates and scores member actions as they move through five journey stages:
//!
//! - **Protection**: community rules filtered by stage raise allow/deny
//!   decisions with accumulated mitigations
//! - **Progression**: per-transition criteria, community validation and
//!   empowerment thresholds gate movement between stages
//! - **Participation**: scores democratic-participation events
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  JourneyEvaluator                    │
//! │                                                      │
//! │  ┌────────────┐  ┌─────────────┐  ┌───────────────┐  │
//! │  │ Protection │  │ Progression │  │ Participation │  │
//! │  └─────┬──────┘  └──────┬──────┘  └───────┬───────┘  │
//! │        │                │     ┌────────┐  │          │
//! │        │                └─────│ Oracle │  │          │
//! │        │                      └────────┘  │          │
//! │  ┌─────▼────────────────────────────────────▼──────┐ │
//! │  │   ValuesValidator  +  Arc<RuleCatalog>          │ │
//! │  └─────────────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use journey::{JourneyEvaluator, JourneyContext};
//! use liberation::{JourneyStage, LiberationValues};
//!
//! let evaluator = JourneyEvaluator::builder().build().await?;
//! let values = LiberationValues::new(0.8, 0.85, 0.9, 0.85);
//! let result = evaluator
//!     .progress_journey(
//!         "member-1",
//!         JourneyStage::Crisis,
//!         JourneyStage::Stabilization,
//!         &JourneyContext::default(),
//!         &values,
//!     )
//!     .await?;
//! assert!(result.allowed);
//! ```

pub mod audit;
pub mod config;
pub mod evaluator;
pub mod oracle;
pub mod participation;
pub mod progression;
pub mod protection;
pub mod sources;
pub mod types;

// Re-export main types
pub use config::JourneyConfig;
pub use evaluator::{JourneyEvaluator, JourneyEvaluatorBuilder};
pub use oracle::{AlwaysSupported, CommunitySupportOracle, OracleError};
pub use participation::ParticipationEvaluator;
pub use progression::ProgressionEngine;
pub use protection::ProtectionEngine;
pub use sources::{RuleSource, StaticRuleSource, YamlRuleSource};
pub use types::*;
