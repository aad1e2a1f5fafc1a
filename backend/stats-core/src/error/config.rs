//! Errors loading `config.json`.
//!
//! The file is optional and only ever read; a missing file means defaults.

use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("Config Unreadable Error: {path}: {source} {location}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    /// Not valid JSON, or a field has the wrong type
    #[error("Config Syntax Error: {path} line {line} column {column}: {reason} {location}")]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
        reason: String,
        location: ErrorLocation,
    },

    /// No `--config-dir` and no platform config directory
    #[error("Config Directory Error: {reason} {location}")]
    NoConfigDir {
        reason: String,
        location: ErrorLocation,
    },

    /// Parsed, but a value is out of range
    #[error("Config Invalid Error: {field}: {reason} {location}")]
    InvalidField {
        field: &'static str,
        reason: String,
        location: ErrorLocation,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidField {
            field,
            reason: reason.into(),
            location: ErrorLocation::caller(),
        }
    }

    /// The offending field, for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }
}
