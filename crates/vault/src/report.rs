//! Structured generation events.
//!
//! Components report through an injected [`Reporter`] instead of writing
//! to a process-wide stream, so tests can assert on exactly what was
//! emitted for which path.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    Info,
    Warn,
    Error,
}

/// One generation event: severity, message, and the filesystem path it
/// concerns (when there is one).
#[derive(Debug, Clone, Serialize)]
pub struct ReportEvent {
    pub level: ReportLevel,
    pub message: String,
    pub path: Option<PathBuf>,
}

impl ReportEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ReportLevel::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(ReportLevel::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ReportLevel::Error, message)
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    fn new(level: ReportLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            path: None,
        }
    }
}

pub trait Reporter: Send + Sync {
    fn event(&self, event: ReportEvent);
}

/// Forwards every event to the process-wide `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn event(&self, event: ReportEvent) {
        let path = event
            .path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        match event.level {
            ReportLevel::Info => info!(path = %path, "{}", event.message),
            ReportLevel::Warn => warn!(path = %path, "{}", event.message),
            ReportLevel::Error => error!(path = %path, "{}", event.message),
        }
    }
}

/// Buffers events in memory. Used by tests to assert on emitted events.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Reporter for CollectingReporter {
    fn event(&self, event: ReportEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_reporter_stores_events_in_order() {
        let reporter = CollectingReporter::new();
        reporter.event(ReportEvent::info("first"));
        reporter.event(ReportEvent::warn("second").with_path("/tmp/x"));

        let events = reporter.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].level, ReportLevel::Info);
        assert_eq!(events[0].message, "first");
        assert!(events[0].path.is_none());
        assert_eq!(events[1].level, ReportLevel::Warn);
        assert_eq!(events[1].path.as_deref(), Some(std::path::Path::new("/tmp/x")));
    }

    #[test]
    fn event_constructors_set_level() {
        assert_eq!(ReportEvent::info("m").level, ReportLevel::Info);
        assert_eq!(ReportEvent::warn("m").level, ReportLevel::Warn);
        assert_eq!(ReportEvent::error("m").level, ReportLevel::Error);
    }
}
