//! Global constants for confmark
//!
//! Centralized location for crate-wide constants

use std::time::Duration;

/// Service property carrying the PID a capability marker was published for
/// Components waiting on a configuration entry select markers on this property
pub const MARKER_PID_PROPERTY: &str = "required-persistent-id";

/// Prefix for generated listener identifiers
pub const LISTENER_ID_PREFIX: &str = "required-config-listener";

/// Default delay between the stop and start halves of a restart
pub const DEFAULT_RESTART_DELAY: Duration = Duration::from_secs(5);
