//! Listener settings
//!
//! Already-parsed construction values for the listener. The declarative
//! translation layer that produces these from a structured document lives
//! outside this crate; a TOML helper is provided for hosts that keep the
//! values in a file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_RESTART_DELAY;

/// Error loading or validating listener settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Construction values for a [`RequiredConfigListener`]
///
/// [`RequiredConfigListener`]: crate::listener::RequiredConfigListener
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerSettings {
    /// Allow pattern strings; a match admits a PID outright
    pub allow_patterns: Vec<String>,
    /// Deny pattern strings; consulted only when no allow pattern matches
    pub deny_patterns: Vec<String>,
    /// Fixed listener id; a unique id is generated when absent
    pub listener_id: Option<String>,
    /// Delay between the stop and start halves of a restart, in milliseconds
    pub restart_delay_ms: u64,
}

impl Default for ListenerSettings {
    fn default() -> Self {
        Self {
            allow_patterns: Vec::new(),
            deny_patterns: Vec::new(),
            listener_id: None,
            restart_delay_ms: DEFAULT_RESTART_DELAY.as_millis() as u64,
        }
    }
}

impl ListenerSettings {
    /// Restart delay as a duration
    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }

    /// Parse settings from a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate value ranges
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.restart_delay_ms == 0 {
            return Err(SettingsError::Invalid(
                "restart_delay_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
