//! Community-support oracle.
//!
//! Transitions flagged for community validation ask an external feedback
//! subsystem whether the community endorses the move. The engine treats any
//! failure to answer, including a timeout, as "not supported".

use async_trait::async_trait;

use liberation::ProgressionRule;

use crate::types::JourneyContext;

/// Error types for oracle calls.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// Feedback subsystem is not reachable
    #[error("Community feedback unavailable: {0}")]
    Unavailable(String),
}

/// Source of the community-support signal.
#[async_trait]
pub trait CommunitySupportOracle: Send + Sync {
    /// Whether the community supports this member making this transition.
    async fn is_supported(
        &self,
        member_id: &str,
        rule: &ProgressionRule,
        context: &JourneyContext,
    ) -> Result<bool, OracleError>;
}

/// Oracle that endorses every transition.
///
/// Used until a community feedback subsystem is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSupported;

#[async_trait]
impl CommunitySupportOracle for AlwaysSupported {
    async fn is_supported(
        &self,
        member_id: &str,
        rule: &ProgressionRule,
        _context: &JourneyContext,
    ) -> Result<bool, OracleError> {
        tracing::debug!(
            member_id = %member_id,
            from = %rule.from_stage,
            to = %rule.to_stage,
            "Community support assumed"
        );
        Ok(true)
    }
}
