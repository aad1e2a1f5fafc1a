pub mod builder;

use crate::{Contributor, LanguageUsage};

use serde::Serialize;

/// Everything the aggregate view shows for one repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoSummary {
    pub name: String,
    pub description: String,
    pub commit_count: u64,
    pub branch_count: usize,
    pub contributors: Vec<Contributor>,
    pub languages: Option<LanguageUsage>,
}

impl RepoSummary {
    pub fn contributor_count(&self) -> usize {
        self.contributors.len()
    }

    pub fn contributor_logins(&self) -> impl Iterator<Item = &str> {
        self.contributors.iter().map(|c| c.login.as_str())
    }
}
