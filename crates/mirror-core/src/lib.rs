//! One-way directory mirroring engine
//!
//! Each cycle walks the source and replica trees, classifies every relative
//! path, then reconciles the replica:
//!
//! 1. **purge**: delete entries that exist only in the replica
//! 2. **create**: copy files and create directories that exist only in the source
//! 3. **update**: overwrite common files whose content digests differ
//!
//! The [`Synchronizer`] drives cycles on a fixed interval. Everything it does
//! is reported through an injected [`SyncReporter`]; the engine never
//! configures log destinations itself.

pub mod compare;
pub mod differ;
pub mod driver;
pub mod error;
pub mod reconcile;
pub mod report;
pub mod reporter;
pub mod settings;
pub mod walker;

pub use compare::ContentComparator;
pub use differ::Classification;
pub use driver::{CyclePhase, Sleeper, Synchronizer, ThreadSleeper};
pub use error::{Error, Result};
pub use reconcile::Reconciler;
pub use report::CycleReport;
pub use reporter::{LogLevel, LogRecord, MemoryReporter, SyncReporter, TracingReporter};
pub use settings::SyncSettings;
pub use walker::{TreeSnapshot, TreeWalker};

// Re-export for downstream consumers
pub use mirror_fs::{ContentDigest, RelativePath};
