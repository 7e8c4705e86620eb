//! Engine configuration
//!
//! Loaded from an optional TOML file, then overridden by CLI flags. The
//! resulting value is passed into session creation; nothing reads it globally.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::EngineError;

/// Engine and server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Consecutive poor turns before the prospect hangs up
    #[serde(default = "default_frustration_threshold")]
    pub frustration_threshold: u32,

    /// Seed for profiles whose request carries none
    #[serde(default)]
    pub default_seed: Option<u64>,

    /// Where snapshots are written
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,

    /// Persist a snapshot after every turn
    #[serde(default)]
    pub autosave: bool,

    /// Ended sessions kept for status/profile lookups; oldest go first
    #[serde(default = "default_archive_limit")]
    pub archive_limit: usize,

    /// HTTP listen address
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

fn default_frustration_threshold() -> u32 {
    crate::DEFAULT_FRUSTRATION_THRESHOLD
}

fn default_snapshot_dir() -> String {
    "./snapshots".to_string()
}

fn default_archive_limit() -> usize {
    256
}

fn default_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frustration_threshold: default_frustration_threshold(),
            default_seed: None,
            snapshot_dir: default_snapshot_dir(),
            autosave: false,
            archive_limit: default_archive_limit(),
            addr: default_addr(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl EngineConfig {
    /// Load from a TOML file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            EngineError::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Parse from TOML text and validate
    pub fn from_toml(text: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = toml::from_str(text)
            .map_err(|e| EngineError::configuration(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.frustration_threshold == 0 {
            return Err(EngineError::configuration("frustration_threshold must be at least 1"));
        }
        Ok(())
    }
}
