//! Log sink setup
//!
//! Info-level records (and everything above) go to the info log, errors to
//! the error log. Both files are appended to. The console shows warnings by
//! default, `RUST_LOG` or `--verbose` widen it.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

use crate::error::{CliError, Result};

fn open_sink(path: &Path) -> Result<Mutex<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::logging(format!("cannot open {}: {}", path.display(), e)))?;
    Ok(Mutex::new(file))
}

/// Install the global subscriber with file sinks at `info_log` and `error_log`.
pub fn init(info_log: &Path, error_log: &Path, verbose: bool) -> Result<()> {
    let info_layer = fmt::layer()
        .with_writer(open_sink(info_log)?)
        .with_ansi(false)
        .with_target(false)
        .with_filter(LevelFilter::INFO);

    let error_layer = fmt::layer()
        .with_writer(open_sink(error_log)?)
        .with_ansi(false)
        .with_target(false)
        .with_filter(LevelFilter::ERROR);

    let default_directive = if verbose { "debug" } else { "warn" };
    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| CliError::logging(e.to_string()))?;
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact()
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(info_layer)
        .with(error_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}
