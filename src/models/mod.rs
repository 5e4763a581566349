//! Data models module
//!
//! Defines core data structures:
//! - ConfigEvent / EventKind: configuration lifecycle events from the source
//! - ListenerState: the listener's Stopped/Running lifecycle state
//! - ListenerStatus: point-in-time snapshot for management adapters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of configuration lifecycle event delivered by the event source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A configuration entry was created or its contents changed
    Updated,
    /// A configuration entry was removed
    Deleted,
    /// A configuration entry changed provenance; presence and content
    /// are unchanged
    LocationChanged,
    /// An event code this crate does not recognize
    Other(u32),
}

impl EventKind {
    /// Map a raw facility event code to an event kind
    ///
    /// The facility may introduce new codes over time; anything unrecognized
    /// is carried through as [`EventKind::Other`] so the listener can log it
    /// instead of failing.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => EventKind::Updated,
            2 => EventKind::Deleted,
            3 => EventKind::LocationChanged,
            other => EventKind::Other(other),
        }
    }
}

/// A configuration lifecycle event for a single PID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEvent {
    /// Identifier of the configuration entry the event is about
    pub pid: String,
    /// What happened to the entry
    pub kind: EventKind,
}

impl ConfigEvent {
    pub fn new(pid: impl Into<String>, kind: EventKind) -> Self {
        Self {
            pid: pid.into(),
            kind,
        }
    }
}

/// Lifecycle state of the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerState {
    Stopped,
    Running,
}

/// Point-in-time snapshot of the listener's observable state
///
/// The read surface management/introspection adapters forward to. It carries
/// no state machine of its own.
#[derive(Debug, Clone, Serialize)]
pub struct ListenerStatus {
    /// Stable unique identifier of the listener instance
    pub listener_id: String,
    /// Current lifecycle state
    pub state: ListenerState,
    /// When the listener last transitioned to Running (None before the first)
    pub start_time: Option<DateTime<Utc>>,
    /// When the listener last transitioned to Stopped (None before the first)
    pub stop_time: Option<DateTime<Utc>>,
    /// Configured allow pattern strings
    pub allow_patterns: Vec<String>,
    /// Configured deny pattern strings
    pub deny_patterns: Vec<String>,
    /// PIDs with a currently published capability marker, sorted
    pub registered_pids: Vec<String>,
}
