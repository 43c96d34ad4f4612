//! Exporter options (`key=value` pairs)

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum OptionError {
    #[error("Invalid option '{0}', not in KEY=VALUE format")]
    Malformed(String),

    #[error("Unknown option '{0}' (expected one of: summary, fold)")]
    UnknownKey(String),

    #[error("Invalid value '{value}' for {key} option, expected 1 or 0")]
    InvalidValue { key: String, value: String },
}

/// Options shared by the exporters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Append the full task listing after the primary view
    pub summary: bool,

    /// Hide subtrees whose direct children are all DONE (simple and full only)
    pub fold: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            summary: true,
            fold: false,
        }
    }
}

impl ExportConfig {
    /// Applies a single `key=value` option
    pub fn apply(&mut self, pair: &str) -> Result<(), OptionError> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| OptionError::Malformed(pair.to_string()))?;
        let key = key.trim();
        let value = value.trim();

        let slot = match key {
            "summary" => &mut self.summary,
            "fold" => &mut self.fold,
            _ => return Err(OptionError::UnknownKey(key.to_string())),
        };
        *slot = parse_flag(value).ok_or_else(|| OptionError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        Ok(())
    }

    /// Applies every option in order; later pairs win
    pub fn with_options<I, S>(mut self, pairs: I) -> Result<Self, OptionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pair in pairs {
            self.apply(pair.as_ref())?;
        }
        Ok(self)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
