//! Capability publisher interface
//!
//! The external facility capability markers are published to. Publish and
//! retract calls may block; failures are reported to the caller and are
//! never fatal to the listener.

use std::collections::HashMap;

use thiserror::Error;

/// Error returned by the capability publisher
#[derive(Debug, Error)]
pub enum PublishError {
    /// The marker could not be published
    #[error("failed to publish capability marker for PID '{pid}': {reason}")]
    Publish { pid: String, reason: String },
    /// The marker could not be retracted; the handle may already be invalid
    #[error("failed to retract capability marker {handle:?}: {reason}")]
    Retract { handle: MarkerHandle, reason: String },
}

/// Opaque handle to one published capability marker
///
/// Issued by the publisher on `publish`; the publisher owns the marker and
/// this handle is the only way to retract it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// External registry capability markers are published to and retracted from
pub trait MarkerPublisher: Send + Sync {
    /// Publish a capability marker for a PID with its service properties
    fn publish(
        &self,
        pid: &str,
        properties: &HashMap<String, String>,
    ) -> Result<MarkerHandle, PublishError>;

    /// Retract a previously published marker
    fn retract(&self, handle: MarkerHandle) -> Result<(), PublishError>;
}
