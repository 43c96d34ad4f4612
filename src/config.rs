//! Configuration handling for Task Burrito
//!
//! Default exporter options are read from `config.toml` in the user's
//! configuration directory (`~/.config/task-burrito/` on Linux), or from the
//! file named with `--config`. Command-line `key=value` options override it.
//!
//! ```toml
//! default_exporter = "simple"
//!
//! [export]
//! summary = true
//! fold = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::export::{ExportConfig, Exporter};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Exporter used when none is given on the command line
    pub default_exporter: Option<Exporter>,

    /// Defaults for exporter options
    pub export: ExportConfig,
}

impl Config {
    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "task-burrito", "task-burrito")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads from `explicit` if given (it must exist), else the global file
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let path = match Self::global_config_dir() {
            Some(dir) => dir.join("config.toml"),
            None => return Ok(Self::default()),
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Reads and parses a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
