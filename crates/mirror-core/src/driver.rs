//! Cycle Driver: run walk → classify → purge → create → update on a timer

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::compare::ContentComparator;
use crate::differ::Classification;
use crate::reconcile::Reconciler;
use crate::report::CycleReport;
use crate::reporter::SyncReporter;
use crate::settings::SyncSettings;
use crate::walker::TreeWalker;
use crate::Result;

/// Where the synchronizer is within its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePhase {
    #[default]
    Idle,
    Walking,
    Classifying,
    Purging,
    Creating,
    Updating,
    Sleeping,
}

/// Suspends the driver between cycles.
pub trait Sleeper {
    fn sleep(&mut self, interval: Duration);
}

/// Blocks the current thread for the whole interval.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}

/// Mirrors a source tree onto a replica tree, one cycle at a time.
///
/// Owns the two roots and the interval for its entire lifetime. Nothing
/// inside a cycle is fatal: per-entry failures go to the reporter and the
/// cycle moves on.
pub struct Synchronizer {
    source: PathBuf,
    replica: PathBuf,
    interval: Duration,
    reporter: Arc<dyn SyncReporter>,
    phase: CyclePhase,
    cycles: u64,
}

impl Synchronizer {
    /// Create a synchronizer without validating the roots.
    pub fn new(
        source: impl Into<PathBuf>,
        replica: impl Into<PathBuf>,
        interval: Duration,
        reporter: Arc<dyn SyncReporter>,
    ) -> Self {
        Self {
            source: source.into(),
            replica: replica.into(),
            interval,
            reporter,
            phase: CyclePhase::Idle,
            cycles: 0,
        }
    }

    /// Validate `settings` and build a synchronizer from them.
    ///
    /// # Errors
    ///
    /// Returns the first startup check that fails; see [`SyncSettings::validate`].
    pub fn from_settings(settings: &SyncSettings, reporter: Arc<dyn SyncReporter>) -> Result<Self> {
        settings.validate()?;
        Ok(Self::new(
            settings.source.clone(),
            settings.replica.clone(),
            settings.interval(),
            reporter,
        ))
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn replica(&self) -> &Path {
        &self.replica
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Number of cycles run to completion.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles
    }

    fn enter(&mut self, phase: CyclePhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "Cycle phase");
        self.phase = phase;
    }

    /// Run one full cycle and return what it did.
    pub fn run_cycle(&mut self) -> CycleReport {
        let clock = Instant::now();
        let mut report = CycleReport::new(Utc::now());
        let shared = Arc::clone(&self.reporter);
        let reporter: &dyn SyncReporter = &*shared;
        let source = self.source.clone();
        let replica = self.replica.clone();

        self.ensure_replica_root(reporter, &mut report);

        self.enter(CyclePhase::Walking);
        let walker = TreeWalker::new(reporter);
        let source_tree = walker.walk(&source);
        let replica_tree = walker.walk(&replica);
        report.source_entries = source_tree.len();
        report.replica_entries = replica_tree.len();
        report.traversal_errors = source_tree.unreadable().len() + replica_tree.unreadable().len();

        self.enter(CyclePhase::Classifying);
        let classification = Classification::classify(&source_tree, &replica_tree);

        let reconciler = Reconciler::new(&source, &replica, reporter);
        self.enter(CyclePhase::Purging);
        reconciler.purge(&classification.only_replica, &source_tree, &mut report);

        self.enter(CyclePhase::Creating);
        reconciler.create(&classification.only_source, &mut report);

        self.enter(CyclePhase::Updating);
        ContentComparator::new(&source, &replica, reporter).update(&classification.common, &mut report);

        report.duration_ms = u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.cycles += 1;
        self.enter(CyclePhase::Idle);

        tracing::debug!(
            cycle = self.cycles,
            actions = report.actions(),
            failures = report.failures,
            duration_ms = report.duration_ms,
            "Cycle complete"
        );
        report
    }

    /// Run cycles, sleeping `interval` between them, until `stop` returns
    /// true for a cycle's report. Returns the number of completed cycles.
    pub fn run_until<S, F>(&mut self, sleeper: &mut S, mut stop: F) -> u64
    where
        S: Sleeper + ?Sized,
        F: FnMut(&CycleReport) -> bool,
    {
        loop {
            let report = self.run_cycle();
            if stop(&report) {
                return self.cycles;
            }
            self.enter(CyclePhase::Sleeping);
            sleeper.sleep(self.interval);
        }
    }

    /// Run cycles forever. Only process termination stops the loop.
    pub fn run_forever<S: Sleeper + ?Sized>(&mut self, sleeper: &mut S) -> ! {
        loop {
            self.run_cycle();
            self.enter(CyclePhase::Sleeping);
            sleeper.sleep(self.interval);
        }
    }

    fn ensure_replica_root(&self, reporter: &dyn SyncReporter, report: &mut CycleReport) {
        if self.replica.is_dir() {
            return;
        }
        match mirror_fs::io::create_dir_all(&self.replica) {
            Ok(()) => {
                reporter.record_info(&format!("Created directory {}", self.replica.display()));
                report.dirs_created += 1;
            }
            Err(e) => {
                reporter.record_error(&format!("Error creating replica directory: {}", e));
                report.failures += 1;
            }
        }
    }
}
