//! Configuration loading and management
//!
//! Handles parsing of the optional `config.toml` in the data directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::task::Priority;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Override for the data directory holding tasks and theme state
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Priority assigned to new tasks when none is given
    #[serde(default = "default_priority")]
    pub default_priority: Priority,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_priority: default_priority(),
        }
    }
}

fn default_priority() -> Priority {
    Priority::Medium
}

impl Config {
    /// Load configuration from a `config.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the given path, or return defaults when the
    /// file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "ignoring unreadable config"
                );
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
