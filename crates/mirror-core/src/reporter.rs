//! Injected action/failure reporting
//!
//! The engine emits one info record per action it performs and one error
//! record per failed operation. Where those records end up is decided by
//! whoever constructs the [`Synchronizer`](crate::Synchronizer).

use std::sync::Mutex;

/// Sink for the synchronizer's action and failure records.
pub trait SyncReporter: Send + Sync {
    /// Record a completed action (create, copy, update, delete).
    fn record_info(&self, message: &str);

    /// Record a failed operation, including the path and the reason.
    fn record_error(&self, message: &str);
}

/// Forwards records to `tracing` events at INFO and ERROR level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl SyncReporter for TracingReporter {
    fn record_info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn record_error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Severity of a [`LogRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// A single record captured by [`MemoryReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Keeps every record in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Messages recorded at INFO level.
    pub fn infos(&self) -> Vec<String> {
        self.messages(LogLevel::Info)
    }

    /// Messages recorded at ERROR level.
    pub fn errors(&self) -> Vec<String> {
        self.messages(LogLevel::Error)
    }

    /// Records whose message mentions `needle`.
    pub fn mentioning(&self, needle: &str) -> Vec<LogRecord> {
        self.lock()
            .iter()
            .filter(|r| r.message.contains(needle))
            .cloned()
            .collect()
    }

    /// Drop all records.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn messages(&self, level: LogLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.lock().push(LogRecord {
            level,
            message: message.to_string(),
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SyncReporter for MemoryReporter {
    fn record_info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn record_error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_reporter_keeps_order_and_levels() {
        let reporter = MemoryReporter::new();
        reporter.record_info("Copied a");
        reporter.record_error("Error deleting b");
        reporter.record_info("Copied c");

        assert_eq!(reporter.infos(), vec!["Copied a", "Copied c"]);
        assert_eq!(reporter.errors(), vec!["Error deleting b"]);
        assert_eq!(reporter.records()[1].level, LogLevel::Error);
        assert_eq!(reporter.mentioning("Copied c").len(), 1);

        reporter.clear();
        assert!(reporter.records().is_empty());
    }
}
