//! PID filter engine
//!
//! Classifies PIDs for admission against ordered allow and deny pattern
//! lists. Evaluation is allow-first: an allow match short-circuits to Accept
//! even when a deny pattern also matches, and a PID matching nothing is
//! accepted (default-open policy).

pub mod pattern;

use log::info;

pub use pattern::{compile_patterns, CompiledPattern};

/// Verdict of classifying a PID against the configured filter rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Accept,
    Reject,
}

/// Ordered allow/deny rule sets used to admit PIDs
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    allow: Vec<CompiledPattern>,
    deny: Vec<CompiledPattern>,
}

impl FilterSet {
    /// An empty filter set that accepts every PID
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter set from allow and deny pattern strings
    pub fn from_patterns(allow: &[String], deny: &[String]) -> Self {
        Self {
            allow: compile_patterns(allow),
            deny: compile_patterns(deny),
        }
    }

    /// Replace the allow rule set with freshly compiled patterns
    pub fn set_allow_patterns(&mut self, patterns: &[String]) {
        self.allow = compile_patterns(patterns);
    }

    /// Replace the deny rule set with freshly compiled patterns
    pub fn set_deny_patterns(&mut self, patterns: &[String]) {
        self.deny = compile_patterns(patterns);
    }

    /// The configured allow pattern strings
    pub fn allow_patterns(&self) -> Vec<String> {
        self.allow.iter().map(|p| p.as_str().to_string()).collect()
    }

    /// The configured deny pattern strings
    pub fn deny_patterns(&self) -> Vec<String> {
        self.deny.iter().map(|p| p.as_str().to_string()).collect()
    }

    /// Classify a PID against the allow and deny rule sets
    pub fn classify(&self, pid: &str) -> Classification {
        for pattern in &self.allow {
            if pattern.matches(pid) {
                info!("Allow pattern '{}' matched PID '{}'", pattern.as_str(), pid);
                return Classification::Accept;
            }
        }

        for pattern in &self.deny {
            if pattern.matches(pid) {
                info!("Deny pattern '{}' matched PID '{}'", pattern.as_str(), pid);
                return Classification::Reject;
            }
        }

        Classification::Accept
    }
}
