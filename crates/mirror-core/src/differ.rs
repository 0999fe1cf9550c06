//! Differ: partition two snapshots into only-source, only-replica and common

use std::collections::BTreeSet;

use mirror_fs::RelativePath;

use crate::walker::TreeSnapshot;

/// Every path of either snapshot, in exactly one of three disjoint sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Present in the source, absent from the replica.
    pub only_source: BTreeSet<RelativePath>,
    /// Present in the replica, absent from the source.
    pub only_replica: BTreeSet<RelativePath>,
    /// Present on both sides.
    pub common: BTreeSet<RelativePath>,
}

impl Classification {
    /// Classify every path of `source` and `replica`.
    pub fn classify(source: &TreeSnapshot, replica: &TreeSnapshot) -> Self {
        let source = source.entries();
        let replica = replica.entries();

        Self {
            only_source: source.difference(replica).cloned().collect(),
            only_replica: replica.difference(source).cloned().collect(),
            common: source.intersection(replica).cloned().collect(),
        }
    }

    /// True when both trees list exactly the same paths.
    pub fn is_aligned(&self) -> bool {
        self.only_source.is_empty() && self.only_replica.is_empty()
    }

    /// Size of the union of both snapshots.
    pub fn total(&self) -> usize {
        self.only_source.len() + self.only_replica.len() + self.common.len()
    }
}
