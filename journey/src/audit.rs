//! Audit trail for journey evaluations.
//!
//! Records what was evaluated, for whom, with which outcome and against which
//! catalog. Audit metadata stays out of the evaluation results themselves.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Maximum entries in the audit log before pruning.
const MAX_AUDIT_ENTRIES: usize = 10_000;

/// Which operation produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationKind {
    Interaction,
    Progression,
    Participation,
}

/// Coarse outcome of an evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditOutcome {
    Allowed,
    Denied,
    /// Evaluation returned an error
    Failed(String),
}

/// An entry in the audit log.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    /// Unique entry ID
    pub entry_id: String,
    pub kind: EvaluationKind,
    /// Member or participant evaluated
    pub subject_id: String,
    pub outcome: AuditOutcome,
    /// Short human-readable summary
    pub summary: String,
    /// Catalog the evaluation ran against
    pub catalog_fingerprint: String,
    pub recorded_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        kind: EvaluationKind,
        subject_id: impl Into<String>,
        outcome: AuditOutcome,
        summary: impl Into<String>,
        catalog_fingerprint: impl Into<String>,
    ) -> Self {
        Self {
            entry_id: uuid::Uuid::new_v4().to_string(),
            kind,
            subject_id: subject_id.into(),
            outcome,
            summary: summary.into(),
            catalog_fingerprint: catalog_fingerprint.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// Bounded audit log, newest first.
pub struct AuditLog {
    entries: Arc<RwLock<VecDeque<AuditEntry>>>,
    max_entries: usize,
}

impl AuditLog {
    /// Create a new audit log.
    pub fn new() -> Self {
        Self::with_max_entries(MAX_AUDIT_ENTRIES)
    }

    /// Create with custom max entries.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::new())),
            max_entries,
        }
    }

    /// Record an entry, returning its ID.
    pub async fn record(&self, entry: AuditEntry) -> String {
        let entry_id = entry.entry_id.clone();

        let mut entries = self.entries.write().await;
        entries.push_front(entry);

        // Prune if over limit
        while entries.len() > self.max_entries {
            entries.pop_back();
        }

        entry_id
    }

    /// Most recent entries, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<AuditEntry> {
        let entries = self.entries.read().await;
        entries.iter().take(limit).cloned().collect()
    }

    /// Entries for one member or participant.
    pub async fn for_subject(&self, subject_id: &str) -> Vec<AuditEntry> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|e| e.subject_id == subject_id)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop all entries.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(subject: &str, outcome: AuditOutcome) -> AuditEntry {
        AuditEntry::new(EvaluationKind::Interaction, subject, outcome, "test", "abc")
    }

    #[tokio::test]
    async fn test_record_and_query() {
        let log = AuditLog::new();
        log.record(entry("member-1", AuditOutcome::Allowed)).await;
        let id = log.record(entry("member-2", AuditOutcome::Denied)).await;

        assert_eq!(log.len().await, 2);
        let recent = log.recent(1).await;
        assert_eq!(recent[0].entry_id, id);

        let member_1 = log.for_subject("member-1").await;
        assert_eq!(member_1.len(), 1);
        assert_eq!(member_1[0].outcome, AuditOutcome::Allowed);
    }

    #[test]
    fn test_pruning() {
        tokio_test::block_on(async {
            let log = AuditLog::with_max_entries(2);
            for i in 0..5 {
                log.record(entry(&format!("member-{}", i), AuditOutcome::Allowed)).await;
            }
            assert_eq!(log.len().await, 2);
            assert_eq!(log.recent(10).await[0].subject_id, "member-4");

            log.clear().await;
            assert!(log.is_empty().await);
        });
    }
}
