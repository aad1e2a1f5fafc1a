use common::ErrorLocation;
use models::ModelError;
use stats_core::error::{ConfigError, StatsClientError};

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors raised by the git-profile application layer.
///
/// Core failures are flattened to their message here: the application only
/// ever reports them, it never branches on their variant.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum GitProfileError {
    /// Owner, repository or token could not be resolved from the inputs
    #[error("Not Configured Error: {message} {location}")]
    NotConfigured {
        message: String,
        location: ErrorLocation,
    },

    /// Error from stats-core (requests, config)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Logger could not be set up
    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    /// The view-state actor is gone
    #[error("State Error: {message} {location}")]
    State {
        message: String,
        location: ErrorLocation,
    },

    /// A view could not be rendered or written out
    #[error("Render Error: {message} {location}")]
    Render {
        message: String,
        location: ErrorLocation,
    },
}

impl GitProfileError {
    #[track_caller]
    pub fn not_configured(message: impl Into<String>) -> Self {
        GitProfileError::NotConfigured {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn core(error: impl std::fmt::Display) -> Self {
        GitProfileError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn state(message: impl Into<String>) -> Self {
        GitProfileError::State {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        GitProfileError::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn render(message: impl Into<String>) -> Self {
        GitProfileError::Render {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StatsClientError> for GitProfileError {
    #[track_caller]
    fn from(error: StatsClientError) -> Self {
        GitProfileError::core(error)
    }
}

impl From<ConfigError> for GitProfileError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        GitProfileError::core(error)
    }
}

impl From<ModelError> for GitProfileError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        GitProfileError::core(error)
    }
}
