#![forbid(unsafe_code)]

//! confmark - Required Configuration Capability Markers
//!
//! Watches a configuration-management facility for named configuration
//! entries ("PIDs") and publishes a discoverable capability marker for each
//! entry that is currently defined and not excluded by filter rules.
//! Components that require a configuration entry block their own startup
//! until the marker for that entry becomes visible.
//!
//! The crate is an in-process component with no network or command-line
//! surface. A host wires a [`RequiredConfigListener`] to its two
//! collaborators: a [`ConfigSource`] that owns the configuration entries and
//! a [`MarkerPublisher`] that owns the published markers.

pub mod config;
pub mod constants;
pub mod filter;
pub mod listener;
pub mod marker;
pub mod models;
pub mod publisher;
pub mod registry;
pub mod source;

pub use config::{ListenerSettings, SettingsError};
pub use filter::{Classification, FilterSet};
pub use listener::RequiredConfigListener;
pub use marker::{MarkerError, RequiredConfigMarker};
pub use models::{ConfigEvent, EventKind, ListenerState, ListenerStatus};
pub use publisher::{MarkerHandle, MarkerPublisher, PublishError};
pub use registry::MarkerRegistry;
pub use source::{ConfigEventListener, ConfigSource, SourceError, SubscriptionHandle};
