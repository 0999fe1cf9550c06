//! [`TestTrees`] builder for source/replica scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use mirror_core::{MemoryReporter, Synchronizer};
use tempfile::TempDir;
use walkdir::WalkDir;

/// A temporary directory holding a `source/` and a `replica/` tree.
///
/// # Example
///
/// ```rust,no_run
/// use mirror_test_utils::TestTrees;
///
/// let trees = TestTrees::new();
/// trees.source_file("a.txt", "hi");
/// let (mut sync, _reporter) = trees.synchronizer();
/// sync.run_cycle();
/// trees.assert_replica_file("a.txt", "hi");
/// ```
pub struct TestTrees {
    temp_dir: TempDir,
}

impl Default for TestTrees {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTrees {
    /// Create empty `source/` and `replica/` directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("source")).unwrap();
        fs::create_dir(temp_dir.path().join("replica")).unwrap();
        Self { temp_dir }
    }

    /// The temporary directory containing both trees.
    pub fn base(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn source(&self) -> PathBuf {
        self.base().join("source")
    }

    pub fn replica(&self) -> PathBuf {
        self.base().join("replica")
    }

    /// A synchronizer over both trees with an in-memory reporter.
    pub fn synchronizer(&self) -> (Synchronizer, Arc<MemoryReporter>) {
        let reporter = Arc::new(MemoryReporter::new());
        let sync = Synchronizer::new(
            self.source(),
            self.replica(),
            Duration::from_secs(1),
            reporter.clone(),
        );
        (sync, reporter)
    }

    /// Write a file under the source root, creating parents.
    pub fn source_file(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.source(), rel, content)
    }

    /// Write a file under the replica root, creating parents.
    pub fn replica_file(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.replica(), rel, content)
    }

    /// Create a directory (and parents) under the source root.
    pub fn source_dir(&self, rel: &str) -> PathBuf {
        make_dir(&self.source(), rel)
    }

    /// Create a directory (and parents) under the replica root.
    pub fn replica_dir(&self, rel: &str) -> PathBuf {
        make_dir(&self.replica(), rel)
    }

    /// Every entry under the replica: files map to their content, directories
    /// to `None`. Keys join native path components with forward slashes.
    pub fn replica_listing(&self) -> BTreeMap<String, Option<String>> {
        listing(&self.replica())
    }

    /// Same as [`replica_listing`](Self::replica_listing) for the source.
    pub fn source_listing(&self) -> BTreeMap<String, Option<String>> {
        listing(&self.source())
    }

    /// Assert the replica file at `rel` exists with exactly `content`.
    ///
    /// # Panics
    /// Panics if the file is missing or its content differs.
    pub fn assert_replica_file(&self, rel: &str, content: &str) {
        let path = self.replica().join(rel);
        let actual = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read replica file: {}", path.display()));
        assert_eq!(
            actual,
            content,
            "Replica file {} has unexpected content",
            path.display()
        );
    }

    /// Assert that nothing exists at `rel` under the replica.
    ///
    /// # Panics
    /// Panics if the path exists.
    pub fn assert_replica_missing(&self, rel: &str) {
        let path = self.replica().join(rel);
        assert!(
            !path.exists(),
            "Expected replica path NOT to exist: {}",
            path.display()
        );
    }

    /// Assert that the replica lists exactly the same entries and file
    /// contents as the source.
    ///
    /// # Panics
    /// Panics with both listings if they differ.
    pub fn assert_mirrored(&self) {
        let source = self.source_listing();
        let replica = self.replica_listing();
        assert_eq!(source, replica, "Replica does not mirror source");
    }
}

fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn make_dir(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(&path).unwrap();
    path
}

fn listing(root: &Path) -> BTreeMap<String, Option<String>> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let key = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let content = if entry.file_type().is_dir() {
                None
            } else {
                Some(fs::read_to_string(entry.path()).unwrap_or_default())
            };
            (key, content)
        })
        .collect()
}
