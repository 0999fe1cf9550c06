//! Startup settings and the checks that gate the first cycle
//!
//! Settings are assembled from layers (config file, then command line),
//! with later layers overriding earlier ones, and validated once before the
//! synchronizer starts.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mirror_fs::ConfigStore;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One partial source of settings.
///
/// Unset fields fall through to the layer below, then to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsLayer {
    pub source: Option<PathBuf>,
    pub replica: Option<PathBuf>,
    /// Seconds between the end of one cycle and the start of the next
    pub interval: Option<u64>,
    pub info_log: Option<PathBuf>,
    pub error_log: Option<PathBuf>,
}

impl SettingsLayer {
    /// Load a layer from a TOML, JSON or YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    /// Overlay `higher` onto this layer; fields set in `higher` win.
    pub fn merge(self, higher: SettingsLayer) -> SettingsLayer {
        SettingsLayer {
            source: higher.source.or(self.source),
            replica: higher.replica.or(self.replica),
            interval: higher.interval.or(self.interval),
            info_log: higher.info_log.or(self.info_log),
            error_log: higher.error_log.or(self.error_log),
        }
    }
}

/// Fully resolved settings for one synchronizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSettings {
    pub source: PathBuf,
    pub replica: PathBuf,
    pub interval_secs: u64,
    pub info_log: PathBuf,
    pub error_log: PathBuf,
}

impl SyncSettings {
    pub const DEFAULT_INTERVAL_SECS: u64 = 30;
    pub const DEFAULT_INFO_LOG: &'static str = "info.log";
    pub const DEFAULT_ERROR_LOG: &'static str = "error.log";

    /// Settings for the given roots with every other field at its default.
    pub fn new(source: impl Into<PathBuf>, replica: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            replica: replica.into(),
            interval_secs: Self::DEFAULT_INTERVAL_SECS,
            info_log: PathBuf::from(Self::DEFAULT_INFO_LOG),
            error_log: PathBuf::from(Self::DEFAULT_ERROR_LOG),
        }
    }

    /// Resolve a merged layer into concrete settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSetting`] if no layer supplied a root.
    pub fn resolve(layer: SettingsLayer) -> Result<Self> {
        let source = layer.source.ok_or(Error::MissingSetting { name: "source" })?;
        let replica = layer.replica.ok_or(Error::MissingSetting { name: "replica" })?;
        let defaults = Self::new(source, replica);

        Ok(Self {
            interval_secs: layer.interval.unwrap_or(defaults.interval_secs),
            info_log: layer.info_log.unwrap_or(defaults.info_log.clone()),
            error_log: layer.error_log.unwrap_or(defaults.error_log.clone()),
            ..defaults
        })
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Check that a synchronizer can safely start with these settings.
    ///
    /// - the interval is at least one second
    /// - the source exists and is a directory
    /// - source and replica are neither the same directory nor nested
    ///   inside one another (the replica need not exist yet)
    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            return Err(Error::InvalidInterval {
                seconds: self.interval_secs,
            });
        }

        match fs::metadata(&self.source) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(Error::SourceNotDirectory {
                    path: self.source.clone(),
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::SourceNotFound {
                    path: self.source.clone(),
                });
            }
            Err(e) => return Err(mirror_fs::Error::io(&self.source, e).into()),
        }

        let source_root = dunce::canonicalize(&self.source)
            .map_err(|e| mirror_fs::Error::io(&self.source, e))?;
        let replica_root = resolve_root(&self.replica)?;

        if replica_root.starts_with(&source_root) || source_root.starts_with(&replica_root) {
            return Err(Error::OverlappingRoots {
                source_root,
                replica_root,
            });
        }

        Ok(())
    }
}

/// Canonicalize `path`, or for a path that does not exist yet, its nearest
/// existing ancestor with the missing components appended.
fn resolve_root(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| mirror_fs::Error::io(path, e))?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();

    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved =
        dunce::canonicalize(existing).map_err(|e| mirror_fs::Error::io(existing, e))?;
    for name in missing.iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}
