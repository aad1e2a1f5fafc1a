use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when something tries to move a secret out of its redacted wrapper.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Redacted Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}
