//! Lifecycle events of the server binary.
//!
//! Events are explicit and typed; each one is logged with its name in the
//! `event` field so log consumers can match on it.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Store snapshot loaded
    SnapshotLoaded,
    /// Startup complete, ready to serve
    BootComplete,
    /// Store snapshot written
    SnapshotSaved,
    /// Request could not be parsed
    RequestMalformed,
    /// Input closed, server exiting
    ShutdownComplete,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SnapshotLoaded => "SNAPSHOT_LOADED",
            Event::BootComplete => "BOOT_COMPLETE",
            Event::SnapshotSaved => "SNAPSHOT_SAVED",
            Event::RequestMalformed => "REQUEST_MALFORMED",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
        }
    }

    /// Whether the event reports a problem
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::RequestMalformed)
    }

    /// Log this event at its level
    pub fn emit(self) {
        if self.is_warning() {
            tracing::warn!(event = self.as_str());
        } else {
            tracing::info!(event = self.as_str());
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
