//! Pattern compilation for PID filtering
//!
//! Filter patterns are regular expressions matched against the full PID,
//! not searched within it. A pattern string that fails to compile is dropped
//! with a warning and never aborts configuration.

use log::warn;
use regex::Regex;

/// A compiled filter pattern that retains its source string for read-back
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    raw: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compile a single pattern, anchoring it at both ends for full-string
    /// matching
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    /// The original pattern string as supplied by configuration
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the pattern matches the entire PID
    pub fn matches(&self, pid: &str) -> bool {
        self.regex.is_match(pid)
    }
}

/// Compile a list of pattern strings, dropping any that fail to compile
pub fn compile_patterns(patterns: &[String]) -> Vec<CompiledPattern> {
    let mut compiled = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        match CompiledPattern::compile(pattern) {
            Ok(p) => compiled.push(p),
            Err(err) => {
                warn!("Ignoring pattern '{}' that failed to compile: {}", pattern, err);
            }
        }
    }
    compiled
}
