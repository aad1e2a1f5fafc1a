//! Error types for repository statistics requests.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - Endpoints are recorded as URLs; the token travels in a header and never
//!   appears in any message
//! - All errors include ErrorLocation for debugging
//! - `#[track_caller]` for automatic location capture

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;
use url::Url;

#[derive(Debug, ThisError)]
pub enum StatsClientError {
    /// The API answered with a non-2xx status. Never retried.
    #[error("Request Failed Error: HTTP {status} from {endpoint} {location}")]
    RequestFailed {
        status: HttpStatusCode,
        endpoint: String,
        location: ErrorLocation,
    },

    /// A body arrived but did not have the shape the operation needs.
    #[error("Malformed Response Error: {message} ({endpoint}) {location}")]
    MalformedResponse {
        endpoint: String,
        message: String,
        location: ErrorLocation,
    },

    /// The request never produced a status: DNS, connect, timeout, abort.
    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid Token Error: token contains characters not allowed in an HTTP header {location}")]
    InvalidToken { location: ErrorLocation },

    #[error("HTTP Client Error: {message} {location}")]
    Client {
        message: String,
        location: ErrorLocation,
    },
}

impl StatsClientError {
    #[track_caller]
    pub fn request_failed(status: u16, endpoint: &Url) -> Self {
        StatsClientError::RequestFailed {
            status: HttpStatusCode(status),
            endpoint: endpoint.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed(endpoint: &Url, message: impl Into<String>) -> Self {
        StatsClientError::MalformedResponse {
            endpoint: endpoint.to_string(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_token() -> Self {
        StatsClientError::InvalidToken {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a reqwest error raised while sending or reading a body.
    #[track_caller]
    pub fn from_transport(endpoint: &Url, error: &reqwest::Error) -> Self {
        // reqwest includes the URL in its own message; keep ours uniform instead
        let kind = if error.is_timeout() {
            "timed out"
        } else if error.is_connect() {
            "connection failed"
        } else if error.is_body() || error.is_decode() {
            "failed reading body"
        } else {
            "request failed"
        };

        StatsClientError::Transport {
            message: format!("GET {endpoint} {kind}: {error}"),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// HTTP status if the API answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            StatsClientError::RequestFailed { status, .. } => Some(status.0),
            _ => None,
        }
    }

    pub fn is_request_failed(&self) -> bool {
        matches!(self, StatsClientError::RequestFailed { .. })
    }

    pub fn is_malformed_response(&self) -> bool {
        matches!(self, StatsClientError::MalformedResponse { .. })
    }

    /// Short label for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            StatsClientError::RequestFailed { status, .. } if status.is_auth_failure() => {
                "auth_failure"
            }
            StatsClientError::RequestFailed { status, .. } if status.is_server_error() => {
                "server_error"
            }
            StatsClientError::RequestFailed { .. } => "request_failed",
            StatsClientError::MalformedResponse { .. } => "malformed_response",
            StatsClientError::Transport {
                is_timeout: true, ..
            } => "timeout",
            StatsClientError::Transport {
                is_connection: true,
                ..
            } => "connection",
            StatsClientError::Transport { .. } => "transport",
            StatsClientError::UrlParse { .. } => "url_parse",
            StatsClientError::InvalidToken { .. } => "invalid_token",
            StatsClientError::Client { .. } => "client",
        }
    }
}

impl From<url::ParseError> for StatsClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        StatsClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for StatsClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        StatsClientError::Client {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
