//! Replica-side filesystem operations
//!
//! Deletion and copy both retry once after clearing a read-only attribute,
//! so a write-protected replica entry does not block the mirror.

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;

use crate::{Error, Result};

/// What a path currently refers to on disk.
///
/// Symbolic links are followed, matching `Path::is_file` / `Path::is_dir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Exists but is neither a regular file nor a directory.
    Other,
    Missing,
}

/// Inspect the type of the entry at `path`.
pub fn entry_kind(path: &Path) -> Result<EntryKind> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(EntryKind::File),
        Ok(meta) if meta.is_dir() => Ok(EntryKind::Directory),
        Ok(_) => Ok(EntryKind::Other),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(EntryKind::Missing),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Make `path` writable by its owner.
pub fn clear_readonly(path: &Path) -> Result<()> {
    let mut perms = fs::metadata(path)
        .map_err(|e| Error::io(path, e))?
        .permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        perms.set_mode(perms.mode() | 0o200);
    }
    #[cfg(not(unix))]
    {
        perms.set_readonly(false);
    }

    fs::set_permissions(path, perms).map_err(|e| Error::io(path, e))
}

/// Delete a file, clearing its read-only attribute and retrying once if the
/// first attempt is refused.
pub fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            tracing::debug!(path = %path.display(), "Clearing read-only attribute before retrying delete");
            clear_readonly(path)?;
            fs::remove_file(path).map_err(|e| Error::io(path, e))
        }
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Delete a directory and everything beneath it.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Create a directory and any missing parents.
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Copy `src` over `dst`, creating the destination's parent chain as needed
/// and carrying over the modification time.
///
/// Returns the number of bytes copied.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    if let Some(parent) = dst.parent() {
        create_dir_all(parent)?;
    }

    let copy_error = |source: std::io::Error| Error::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    };

    let bytes = match fs::copy(src, dst) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::PermissionDenied && dst.is_file() => {
            tracing::debug!(path = %dst.display(), "Clearing read-only attribute before retrying copy");
            clear_readonly(dst)?;
            fs::copy(src, dst).map_err(copy_error)?
        }
        Err(e) => return Err(copy_error(e)),
    };

    preserve_modified(src, dst);
    Ok(bytes)
}

/// Best effort: the platform may refuse to set timestamps.
fn preserve_modified(src: &Path, dst: &Path) {
    let result = fs::metadata(src).and_then(|m| m.modified()).and_then(|mtime| {
        let file = File::options()
            .write(true)
            .open(dst)
            .or_else(|_| File::open(dst))?;
        file.set_modified(mtime)
    });

    if let Err(e) = result {
        tracing::warn!(
            "Could not preserve modification time on {}: {}",
            dst.display(),
            e
        );
    }
}
