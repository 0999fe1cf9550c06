//! Reconciler: purge replica-only entries, create source-only entries

use std::collections::BTreeSet;
use std::path::Path;

use mirror_fs::io::{self, EntryKind};
use mirror_fs::RelativePath;

use crate::report::CycleReport;
use crate::reporter::SyncReporter;
use crate::walker::TreeSnapshot;

/// Applies the purge and create phases of a cycle.
///
/// Each entry is handled independently: a failure is reported and counted,
/// and processing moves on to the next entry.
pub struct Reconciler<'a> {
    source: &'a Path,
    replica: &'a Path,
    reporter: &'a dyn SyncReporter,
}

impl<'a> Reconciler<'a> {
    pub fn new(source: &'a Path, replica: &'a Path, reporter: &'a dyn SyncReporter) -> Self {
        Self {
            source,
            replica,
            reporter,
        }
    }

    /// Delete every replica-only entry.
    ///
    /// Paths are visited in lexical order so a directory is removed before
    /// its contents are considered; entries that vanished with their parent
    /// are skipped silently. Entries under a source subtree that could not be
    /// read this cycle are kept.
    pub fn purge(
        &self,
        only_replica: &BTreeSet<RelativePath>,
        source_tree: &TreeSnapshot,
        report: &mut CycleReport,
    ) {
        for path in only_replica {
            let full = path.resolve(self.replica);

            if source_tree.is_shadowed(path) {
                self.reporter.record_error(&format!(
                    "Skipping purge of {}: source subtree could not be read",
                    full.display()
                ));
                report.purges_deferred += 1;
                continue;
            }

            match io::entry_kind(&full) {
                Ok(EntryKind::File) => self.delete_file(&full, report),
                Ok(EntryKind::Directory) => self.delete_directory(&full, report),
                Ok(EntryKind::Missing) => {}
                Ok(EntryKind::Other) => {
                    tracing::debug!(path = %full.display(), "Not a file or directory, leaving in place");
                }
                Err(e) => {
                    self.reporter
                        .record_error(&format!("Error purging {}: {}", full.display(), e));
                    report.failures += 1;
                }
            }
        }
    }

    /// Copy every source-only file and create every source-only directory.
    ///
    /// Lexical order guarantees a directory is created before anything
    /// beneath it; file copies still create missing parents themselves.
    pub fn create(&self, only_source: &BTreeSet<RelativePath>, report: &mut CycleReport) {
        for path in only_source {
            let src = path.resolve(self.source);

            match io::entry_kind(&src) {
                Ok(EntryKind::File) => self.copy_file(&src, &path.resolve(self.replica), report),
                Ok(EntryKind::Directory) => {
                    self.create_directory(&path.resolve(self.replica), report)
                }
                Ok(EntryKind::Other) => {
                    tracing::debug!(path = %src.display(), "Not a file or directory, not mirrored");
                }
                Ok(EntryKind::Missing) => {
                    self.reporter.record_error(&format!(
                        "Error accessing {}: no longer exists",
                        src.display()
                    ));
                    report.failures += 1;
                }
                Err(e) => {
                    self.reporter
                        .record_error(&format!("Error accessing {}: {}", src.display(), e));
                    report.failures += 1;
                }
            }
        }
    }

    fn delete_file(&self, full: &Path, report: &mut CycleReport) {
        match io::remove_file(full) {
            Ok(()) => {
                self.reporter
                    .record_info(&format!("Deleted file {}", full.display()));
                report.files_deleted += 1;
            }
            Err(e) => {
                self.reporter.record_error(&format!("Error deleting file: {}", e));
                report.failures += 1;
            }
        }
    }

    /// A partially removed directory stays replica-only and is retried next cycle.
    fn delete_directory(&self, full: &Path, report: &mut CycleReport) {
        match io::remove_dir_all(full) {
            Ok(()) => {
                self.reporter
                    .record_info(&format!("Deleted directory {}", full.display()));
                report.dirs_deleted += 1;
            }
            Err(e) => {
                self.reporter
                    .record_error(&format!("Error deleting directory: {}", e));
                report.failures += 1;
            }
        }
    }

    fn copy_file(&self, src: &Path, dst: &Path, report: &mut CycleReport) {
        match io::copy_file(src, dst) {
            Ok(bytes) => {
                self.reporter.record_info(&format!(
                    "Copied file {} to {}",
                    src.display(),
                    dst.display()
                ));
                tracing::debug!(bytes, "Copy complete");
                report.files_copied += 1;
            }
            Err(e) => {
                self.reporter.record_error(&format!("Error copying file: {}", e));
                report.failures += 1;
            }
        }
    }

    fn create_directory(&self, dst: &Path, report: &mut CycleReport) {
        match io::create_dir_all(dst) {
            Ok(()) => {
                self.reporter
                    .record_info(&format!("Created directory {}", dst.display()));
                report.dirs_created += 1;
            }
            Err(e) => {
                self.reporter
                    .record_error(&format!("Error creating directory: {}", e));
                report.failures += 1;
            }
        }
    }
}
