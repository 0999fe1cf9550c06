//! Error types for mirror-core

use std::path::PathBuf;

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that prevent the synchronizer from starting.
///
/// Failures inside a running cycle are never surfaced through this type;
/// they are reported per entry and the cycle carries on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source root does not exist
    #[error("Source directory {path} does not exist")]
    SourceNotFound { path: PathBuf },

    /// Source root exists but is not a directory
    #[error("Source {path} is not a directory")]
    SourceNotDirectory { path: PathBuf },

    /// Sync interval must be at least one second
    #[error("Invalid sync interval: {seconds} (must be a positive number of seconds)")]
    InvalidInterval { seconds: u64 },

    /// A required setting was supplied by neither the command line nor a config file
    #[error("Missing required setting: {name}")]
    MissingSetting { name: &'static str },

    /// Source and replica overlap, so a cycle would destroy or grow one of them
    #[error("Source {source_root} and replica {replica_root} must not be the same or nested directories")]
    OverlappingRoots {
        source_root: PathBuf,
        replica_root: PathBuf,
    },

    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),
}
