//! Server configuration
//!
//! Loaded once at boot from a JSON file (default `./plaster.json`).
//! Invalid values fail the boot; nothing is fixed up silently.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stash::MAX_STASH_IDS;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Public address of this instance (required)
    pub instance_domain: String,

    /// Display name of this instance (required)
    pub instance_name: String,

    /// Optional description
    #[serde(default)]
    pub instance_description: Option<String>,

    /// Ids allowed per stash request (default: 100, max: 100)
    #[serde(default = "default_stash_limit")]
    pub stash_limit: usize,

    /// JSON snapshot of the in-memory store (default: none, data is lost
    /// on exit)
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// `tracing` filter directive (default: "info"); `RUST_LOG` wins
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_stash_limit() -> usize {
    MAX_STASH_IDS
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Minimal configuration for an instance
    pub fn new(instance_domain: impl Into<String>, instance_name: impl Into<String>) -> Self {
        Self {
            instance_domain: instance_domain.into(),
            instance_name: instance_name.into(),
            instance_description: None,
            stash_limit: default_stash_limit(),
            snapshot_path: None,
            log_filter: default_log_filter(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.instance_domain.trim().is_empty() {
            return Err(ConfigError::Invalid("instance_domain must not be empty".into()));
        }
        if self.instance_name.trim().is_empty() {
            return Err(ConfigError::Invalid("instance_name must not be empty".into()));
        }
        if self.stash_limit == 0 || self.stash_limit > MAX_STASH_IDS {
            return Err(ConfigError::Invalid(format!(
                "stash_limit must be between 1 and {}, got {}",
                MAX_STASH_IDS, self.stash_limit
            )));
        }
        Ok(())
    }
}
