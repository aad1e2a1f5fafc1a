//! Shared building blocks for git-profile.
//!
//! This crate holds the small utilities every other crate leans on: error
//! location tracking, HTTP status classification and secret handling for the
//! GitHub token. It has no knowledge of GitHub endpoints or statistics.
//!
//! ## Architecture
//!
//! - **common** (this crate): Cross-cutting utilities
//! - **models**: Request-scoped data structures
//! - **stats-core**: Repository statistics client
//! - **git-profile**: Composition root wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_token;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;

#[cfg(test)]
mod tests;
