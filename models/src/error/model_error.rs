use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Missing Field Error: '{field}' in {context} {location}")]
    MissingField {
        field: &'static str,
        context: &'static str,
        location: ErrorLocation,
    },
}

impl ModelError {
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        ModelError::Validation {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn missing_field(field: &'static str, context: &'static str) -> Self {
        ModelError::MissingField {
            field,
            context,
            location: ErrorLocation::caller(),
        }
    }
}
