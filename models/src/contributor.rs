use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A repository contributor.
///
/// Only `login` is typed; everything else GitHub sends (avatar, profile
/// URLs, contribution count, ...) is kept in `fields` so callers can use it
/// without this crate having to know about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Contributor {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            fields: Map::new(),
        }
    }

    /// Commits attributed to this contributor on the default branch.
    pub fn contributions(&self) -> Option<u64> {
        self.fields.get("contributions").and_then(Value::as_u64)
    }

    pub fn html_url(&self) -> Option<&str> {
        self.fields.get("html_url").and_then(Value::as_str)
    }
}
