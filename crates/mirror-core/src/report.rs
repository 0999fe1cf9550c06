//! Per-cycle outcome counters

use chrono::{DateTime, Utc};
use serde::Serialize;

/// What one cycle did.
///
/// Every counted action corresponds to exactly one info record and every
/// counted failure to exactly one error record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// When the cycle started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the cycle
    pub duration_ms: u64,
    /// Entries found under the source root
    pub source_entries: usize,
    /// Entries found under the replica root before reconciliation
    pub replica_entries: usize,
    pub files_deleted: usize,
    pub dirs_deleted: usize,
    pub dirs_created: usize,
    pub files_copied: usize,
    pub files_updated: usize,
    /// Common files whose digests matched
    pub files_unchanged: usize,
    /// Common paths that are a file on one side and a directory on the other
    pub type_mismatches: usize,
    /// Subtrees that could not be listed during the walk
    pub traversal_errors: usize,
    /// Replica entries kept because the matching source subtree was unreadable
    pub purges_deferred: usize,
    /// Failed per-entry operations
    pub failures: usize,
}

impl CycleReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            duration_ms: 0,
            source_entries: 0,
            replica_entries: 0,
            files_deleted: 0,
            dirs_deleted: 0,
            dirs_created: 0,
            files_copied: 0,
            files_updated: 0,
            files_unchanged: 0,
            type_mismatches: 0,
            traversal_errors: 0,
            purges_deferred: 0,
            failures: 0,
        }
    }

    /// Number of purge/create/update actions that succeeded.
    pub fn actions(&self) -> usize {
        self.files_deleted
            + self.dirs_deleted
            + self.dirs_created
            + self.files_copied
            + self.files_updated
    }

    /// Number of error records emitted during the cycle.
    pub fn problems(&self) -> usize {
        self.failures + self.traversal_errors + self.purges_deferred
    }

    /// True when the replica already matched the source.
    pub fn is_noop(&self) -> bool {
        self.actions() == 0 && self.problems() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_report_is_noop() {
        let report = CycleReport::new(Utc::now());
        assert!(report.is_noop());
        assert_eq!(report.actions(), 0);
    }

    #[test]
    fn unchanged_files_are_not_actions() {
        let mut report = CycleReport::new(Utc::now());
        report.files_unchanged = 3;
        report.type_mismatches = 1;
        assert!(report.is_noop());

        report.files_copied = 1;
        assert_eq!(report.actions(), 1);
        assert!(!report.is_noop());
    }

    #[test]
    fn serializes_counters() {
        let mut report = CycleReport::new(Utc::now());
        report.files_updated = 2;

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files_updated"], 2);
        assert!(json["started_at"].is_string());
    }
}
