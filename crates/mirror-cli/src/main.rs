//! dirmirror CLI
//!
//! Mirrors a source directory onto a replica directory every `--interval`
//! seconds until the process is terminated.

mod cli;
mod error;
mod logging;

use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use mirror_core::settings::SettingsLayer;
use mirror_core::{Synchronizer, SyncSettings, ThreadSleeper, TracingReporter};

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;

    // Refuse to start before touching any log file
    settings.validate()?;

    logging::init(&settings.info_log, &settings.error_log, cli.verbose)?;

    let mut synchronizer = Synchronizer::from_settings(&settings, Arc::new(TracingReporter))?;

    if cli.once {
        let report = synchronizer.run_cycle();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        return Ok(());
    }

    tracing::debug!(
        source = %settings.source.display(),
        replica = %settings.replica.display(),
        interval = settings.interval_secs,
        "Starting synchronizer"
    );
    synchronizer.run_forever(&mut ThreadSleeper)
}

fn resolve_settings(cli: &Cli) -> Result<SyncSettings> {
    let file_layer = match &cli.config {
        Some(path) => SettingsLayer::load(path)?,
        None => SettingsLayer::default(),
    };
    Ok(SyncSettings::resolve(file_layer.merge(cli.settings_layer()))?)
}
