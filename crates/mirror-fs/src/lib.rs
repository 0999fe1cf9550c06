//! Filesystem primitives for dirmirror
//!
//! Provides separator-normalized relative paths, streaming content digests,
//! and the delete/copy operations the synchronizer applies to a replica.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::{ContentDigest, compute_file_checksum};
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::EntryKind;
pub use path::RelativePath;
