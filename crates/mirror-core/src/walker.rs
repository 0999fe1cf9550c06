//! Tree Walker: enumerate every entry under a root

use std::collections::BTreeSet;
use std::path::Path;

use mirror_fs::RelativePath;
use walkdir::WalkDir;

use crate::reporter::SyncReporter;

/// Every relative path reachable under a root at one instant.
///
/// Files and directories at every depth are included. Rebuilt from scratch
/// each cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSnapshot {
    entries: BTreeSet<RelativePath>,
    unreadable: BTreeSet<RelativePath>,
}

impl TreeSnapshot {
    /// Build a snapshot from known entries, with no traversal failures.
    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<RelativePath>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            unreadable: BTreeSet::new(),
        }
    }

    pub fn entries(&self) -> &BTreeSet<RelativePath> {
        &self.entries
    }

    pub fn contains(&self, path: &RelativePath) -> bool {
        self.entries.contains(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Subtrees whose contents could not be listed. The root path means the
    /// root itself could not be read.
    pub fn unreadable(&self) -> &BTreeSet<RelativePath> {
        &self.unreadable
    }

    /// Whether the walk saw everything beneath the root.
    pub fn is_complete(&self) -> bool {
        self.unreadable.is_empty()
    }

    /// Mark a subtree as not fully enumerated.
    pub fn mark_unreadable(&mut self, path: RelativePath) {
        self.unreadable.insert(path);
    }

    /// Whether `path` lies under a subtree that could not be read.
    pub fn is_shadowed(&self, path: &RelativePath) -> bool {
        self.unreadable.iter().any(|dir| path.is_within(dir))
    }
}

/// Recursive enumerator producing [`TreeSnapshot`]s.
pub struct TreeWalker<'a> {
    reporter: &'a dyn SyncReporter,
}

impl<'a> TreeWalker<'a> {
    pub fn new(reporter: &'a dyn SyncReporter) -> Self {
        Self { reporter }
    }

    /// Walk `root` recursively.
    ///
    /// Traversal errors are reported and the walk continues with the
    /// remaining entries; the failed subtree is recorded in
    /// [`TreeSnapshot::unreadable`]. Symbolic links are listed as entries but
    /// not descended into.
    pub fn walk(&self, root: &Path) -> TreeSnapshot {
        let mut snapshot = TreeSnapshot::default();

        for item in WalkDir::new(root).min_depth(1).follow_links(false) {
            match item {
                Ok(entry) => {
                    if let Some(relative) = RelativePath::from_full(root, entry.path()) {
                        snapshot.entries.insert(relative);
                    }
                }
                Err(e) => {
                    let failed = e
                        .path()
                        .and_then(|p| RelativePath::from_full(root, p))
                        .unwrap_or_else(RelativePath::root);
                    self.reporter.record_error(&format!(
                        "Error accessing directory {}: {}",
                        failed.resolve(root).display(),
                        e
                    ));
                    snapshot.mark_unreadable(failed);
                }
            }
        }

        tracing::debug!(
            root = %root.display(),
            entries = snapshot.len(),
            complete = snapshot.is_complete(),
            "Walked tree"
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::MemoryReporter;
    use std::fs;

    #[test]
    fn walk_includes_files_and_directories_at_every_depth() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("a/b/c")).unwrap();
        fs::create_dir_all(temp.path().join("empty")).unwrap();
        fs::write(temp.path().join("a/b/file.txt"), "x").unwrap();
        fs::write(temp.path().join("top.txt"), "y").unwrap();

        let reporter = MemoryReporter::new();
        let snapshot = TreeWalker::new(&reporter).walk(temp.path());

        let expected = TreeSnapshot::from_entries([
            "a", "a/b", "a/b/c", "a/b/file.txt", "empty", "top.txt",
        ]);
        assert_eq!(snapshot, expected);
        assert!(reporter.records().is_empty());
    }

    #[test]
    fn walk_of_missing_root_reports_and_returns_empty() {
        let temp = tempfile::tempdir().unwrap();
        let reporter = MemoryReporter::new();

        let snapshot = TreeWalker::new(&reporter).walk(&temp.path().join("missing"));

        assert!(snapshot.is_empty());
        assert!(!snapshot.is_complete());
        assert!(snapshot.is_shadowed(&RelativePath::new("anything")));
        assert_eq!(reporter.errors().len(), 1);
    }

    #[test]
    fn shadowing_follows_unreadable_subtrees() {
        let mut snapshot = TreeSnapshot::from_entries(["locked"]);
        snapshot.mark_unreadable(RelativePath::new("locked"));

        assert!(snapshot.is_shadowed(&RelativePath::new("locked/inner.txt")));
        assert!(!snapshot.is_shadowed(&RelativePath::new("locked-sibling")));
    }
}
