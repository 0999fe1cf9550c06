//! Content Comparator: refresh common files whose digests differ

use std::collections::BTreeSet;
use std::path::Path;

use mirror_fs::io::{self, EntryKind};
use mirror_fs::{ContentDigest, RelativePath, compute_file_checksum};

use crate::report::CycleReport;
use crate::reporter::SyncReporter;

/// Applies the update phase of a cycle.
pub struct ContentComparator<'a> {
    source: &'a Path,
    replica: &'a Path,
    reporter: &'a dyn SyncReporter,
}

impl<'a> ContentComparator<'a> {
    pub fn new(source: &'a Path, replica: &'a Path, reporter: &'a dyn SyncReporter) -> Self {
        Self {
            source,
            replica,
            reporter,
        }
    }

    /// Compare every common path and overwrite the replica copy of any file
    /// whose content differs.
    ///
    /// Only paths that are regular files on both sides are compared.
    /// Directories on both sides need nothing. A path that is a file on one
    /// side and a directory on the other is left untouched.
    pub fn update(&self, common: &BTreeSet<RelativePath>, report: &mut CycleReport) {
        for path in common {
            let src = path.resolve(self.source);
            let dst = path.resolve(self.replica);

            let kinds = match (io::entry_kind(&src), io::entry_kind(&dst)) {
                (Ok(src_kind), Ok(dst_kind)) => (src_kind, dst_kind),
                (Err(e), _) | (_, Err(e)) => {
                    self.reporter
                        .record_error(&format!("Error accessing {}: {}", path, e));
                    report.failures += 1;
                    continue;
                }
            };

            match kinds {
                (EntryKind::File, EntryKind::File) => self.update_file(&src, &dst, report),
                (EntryKind::File, EntryKind::Directory) | (EntryKind::Directory, EntryKind::File) => {
                    tracing::debug!(%path, ?kinds, "Type differs between source and replica, leaving as-is");
                    report.type_mismatches += 1;
                }
                (EntryKind::Missing, _) | (_, EntryKind::Missing) => {
                    tracing::debug!(%path, ?kinds, "Entry vanished since the walk, retrying next cycle");
                }
                _ => {}
            }
        }
    }

    fn update_file(&self, src: &Path, dst: &Path, report: &mut CycleReport) {
        let (Some(src_digest), Some(dst_digest)) =
            (self.digest(src, report), self.digest(dst, report))
        else {
            return;
        };

        if src_digest == dst_digest {
            report.files_unchanged += 1;
            return;
        }

        match io::copy_file(src, dst) {
            Ok(_) => {
                self.reporter
                    .record_info(&format!("Updated file {}", dst.display()));
                report.files_updated += 1;
            }
            Err(e) => {
                self.reporter.record_error(&format!("Error updating file: {}", e));
                report.failures += 1;
            }
        }
    }

    fn digest(&self, path: &Path, report: &mut CycleReport) -> Option<ContentDigest> {
        match compute_file_checksum(path) {
            Ok(digest) => Some(digest),
            Err(e) => {
                self.reporter.record_error(&format!(
                    "Error calculating SHA-256 hash for {}: {}",
                    path.display(),
                    e
                ));
                report.failures += 1;
                None
            }
        }
    }
}
