//! Capability marker value object
//!
//! The object a marker publication represents: "the configuration entry
//! named by this PID is currently present". Construction fails fast on an
//! empty PID, which indicates a defect in a collaborator rather than an
//! environmental condition.

use std::collections::HashMap;

use log::info;
use thiserror::Error;

use crate::constants::MARKER_PID_PROPERTY;

/// Argument error raised while constructing a capability marker
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkerError {
    #[error("PID argument cannot be empty")]
    EmptyPid,
}

/// Marks one required configuration entry as present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredConfigMarker {
    pid: String,
}

impl RequiredConfigMarker {
    pub fn new(pid: impl Into<String>) -> Result<Self, MarkerError> {
        let pid = pid.into();
        if pid.is_empty() {
            return Err(MarkerError::EmptyPid);
        }

        info!("Creating capability marker for required PID '{}'", pid);
        Ok(Self { pid })
    }

    /// The PID this marker vouches for
    pub fn pid(&self) -> &str {
        &self.pid
    }

    /// Service properties the marker is published with
    pub fn properties(&self) -> HashMap<String, String> {
        HashMap::from([(MARKER_PID_PROPERTY.to_string(), self.pid.clone())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_carries_its_pid() {
        let marker = RequiredConfigMarker::new("org.example.datasource").unwrap();
        assert_eq!(marker.pid(), "org.example.datasource");
    }

    #[test]
    fn test_empty_pid_is_a_typed_argument_error() {
        assert_eq!(
            RequiredConfigMarker::new("").unwrap_err(),
            MarkerError::EmptyPid
        );
    }

    #[test]
    fn test_properties_carry_the_pid_under_the_marker_key() {
        let marker = RequiredConfigMarker::new("db-main").unwrap();
        let properties = marker.properties();
        assert_eq!(properties.len(), 1);
        assert_eq!(
            properties.get(MARKER_PID_PROPERTY),
            Some(&"db-main".to_string())
        );
    }
}
