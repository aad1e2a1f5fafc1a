//! Domain models for git-profile.
//!
//! This crate contains pure data structures representing what the statistics
//! client fetches. Models have no I/O - every value here is built and dropped
//! within a single statistics request.
//!
//! ## Architecture
//!
//! - **models** (this crate): Pure data structures
//! - **stats-core**: GitHub calls producing these models
//! - **git-profile**: Application wiring everything together

pub mod commit;
pub mod contributor;
pub mod credentials;
pub mod error;
pub mod language;
pub mod summary;

pub use commit::{CommitRange, CommitRecord, CommitRef};
pub use contributor::Contributor;
pub use credentials::Credentials;
pub use error::model_error::ModelError;
pub use language::LanguageUsage;
pub use summary::RepoSummary;
pub use summary::builder::RepoSummaryBuilder;

#[cfg(test)]
mod tests;
