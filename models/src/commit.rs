//! Commit references and the opaque commit records returned by listings.

use crate::ModelError;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const SHA_FIELD: &str = "sha";
const COMMIT_LIST_CONTEXT: &str = "commit list element";

/// A commit identified by its SHA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

impl CommitRef {
    pub fn new(sha: impl Into<String>) -> Self {
        Self { sha: sha.into() }
    }

    /// Pull the `sha` field out of one element of a commit listing.
    #[track_caller]
    pub fn from_record(record: &CommitRecord) -> Result<Self, ModelError> {
        record
            .sha()
            .map(Self::new)
            .ok_or_else(|| ModelError::missing_field(SHA_FIELD, COMMIT_LIST_CONTEXT))
    }
}

impl fmt::Display for CommitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sha)
    }
}

/// The span of history used to count commits.
///
/// `from` is the oldest commit reachable through the default listing, `to`
/// the newest one on the default branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRange {
    pub from: CommitRef,
    pub to: CommitRef,
}

impl CommitRange {
    pub fn new(from: CommitRef, to: CommitRef) -> Self {
        Self { from, to }
    }

    /// `base...head` path segment for the compare endpoint.
    pub fn compare_spec(&self) -> String {
        format!("{}...{}", self.from, self.to)
    }

    /// A repository with a single commit compares a commit with itself.
    pub fn is_single_commit(&self) -> bool {
        self.from == self.to
    }
}

/// One element of a commit listing, kept as the raw JSON object.
///
/// The statistics client only counts and lists these; the accessors below
/// exist for renderers that want a short label per commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitRecord(Map<String, Value>);

impl CommitRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn sha(&self) -> Option<&str> {
        self.0.get(SHA_FIELD).and_then(Value::as_str)
    }

    /// First line of `commit.message`.
    pub fn subject(&self) -> Option<&str> {
        self.0
            .get("commit")
            .and_then(|commit| commit.get("message"))
            .and_then(Value::as_str)
            .and_then(|message| message.lines().next())
    }

    /// `commit.author.date`, as GitHub formats it (RFC 3339).
    pub fn authored_at(&self) -> Option<&str> {
        self.0
            .get("commit")
            .and_then(|commit| commit.get("author"))
            .and_then(|author| author.get("date"))
            .and_then(Value::as_str)
    }
}
