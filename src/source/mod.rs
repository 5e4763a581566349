//! Configuration event source interface
//!
//! The external facility that owns configuration entries. It answers
//! "list all PIDs" and pushes lifecycle events to subscribed listeners on
//! threads it owns; delivery may be concurrent across PIDs and may overlap
//! caller-invoked lifecycle operations.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::models::ConfigEvent;

/// Error returned by the configuration event source
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be reached or failed mid-listing
    #[error("configuration source I/O failure: {0}")]
    Io(#[from] io::Error),
    /// The source refused the request
    #[error("configuration source unavailable: {0}")]
    Unavailable(String),
}

/// Opaque token identifying one event subscription
///
/// Issued by the source on `subscribe` and required to `unsubscribe`; the
/// source owns the subscription itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Callback interface the source invokes for configuration lifecycle events
pub trait ConfigEventListener: Send + Sync {
    fn on_event(&self, event: &ConfigEvent);
}

/// External source of configuration entries and their lifecycle events
pub trait ConfigSource: Send + Sync {
    /// Register a listener for configuration events
    fn subscribe(&self, listener: Arc<dyn ConfigEventListener>) -> SubscriptionHandle;

    /// Release a previously registered listener
    fn unsubscribe(&self, handle: SubscriptionHandle);

    /// List the PIDs of all currently defined configuration entries
    fn list_all(&self) -> Result<Vec<String>, SourceError>;
}
