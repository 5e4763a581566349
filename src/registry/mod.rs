//! Capability marker registry
//!
//! In-memory map from accepted PID to the opaque publication handle the
//! publisher issued for it. The registry itself is not synchronized: the
//! listener owns the only instance and mutates it under its lifecycle lock,
//! keeping a single-writer discipline over the externally-owned handles.

use std::collections::HashMap;

use crate::publisher::MarkerHandle;

/// Registry of currently published capability markers
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    entries: HashMap<String, MarkerHandle>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a marker is currently recorded for a PID
    pub fn contains(&self, pid: &str) -> bool {
        self.entries.contains_key(pid)
    }

    /// Record the handle for a freshly published marker
    ///
    /// Returns the displaced handle if one was already recorded; callers
    /// check [`contains`](Self::contains) first, so a Some return signals a
    /// bookkeeping bug.
    pub fn insert(&mut self, pid: impl Into<String>, handle: MarkerHandle) -> Option<MarkerHandle> {
        self.entries.insert(pid.into(), handle)
    }

    /// Remove and return the handle for a PID, if one is recorded
    pub fn remove(&mut self, pid: &str) -> Option<MarkerHandle> {
        self.entries.remove(pid)
    }

    /// PIDs with a currently recorded marker, sorted for stable read-back
    pub fn pids(&self) -> Vec<String> {
        let mut pids: Vec<String> = self.entries.keys().cloned().collect();
        pids.sort();
        pids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
