//! GitHub token handling with redacted Debug output.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

/// Scheme GitHub expects in the `Authorization` header for personal tokens.
const AUTHORIZATION_SCHEME: &str = "token";

/// A GitHub access token that never exposes its value in logs, errors or
/// debug output.
///
/// An empty token is allowed: the API answers with 401 and the caller sees a
/// request failure, which is how a missing `GITHUB_TOKEN` is reported.
#[derive(Clone, Default)]
pub struct RedactedToken {
    inner: String,
}

impl RedactedToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: token.into(),
        }
    }

    /// Value for the `Authorization` header: `token <value>`.
    pub fn authorization_header(&self) -> String {
        format!("{AUTHORIZATION_SCHEME} {}", self.inner)
    }

    /// Token length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl fmt::Debug for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedToken([REDACTED])")
    }
}

impl fmt::Display for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED TOKEN]")
    }
}

impl Drop for RedactedToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Prevent accidental serialization
impl serde::Serialize for RedactedToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from("RedactedToken cannot be serialized - use authorization_header() explicitly"),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
