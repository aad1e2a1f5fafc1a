use crate::{Contributor, LanguageUsage, ModelError, RepoSummary};

/// Text shown when a repository has no description or it could not be fetched.
pub const NO_DESCRIPTION_PLACEHOLDER: &str = "No description available";

/// Builder for validated RepoSummary instances.
///
/// Name, commit count, branch count and contributors are required; the
/// description falls back to [`NO_DESCRIPTION_PLACEHOLDER`] and languages
/// may legitimately be absent.
#[derive(Debug, Default)]
pub struct RepoSummaryBuilder {
    name: Option<String>,
    description: Option<String>,
    commit_count: Option<u64>,
    branch_count: Option<usize>,
    contributors: Option<Vec<Contributor>>,
    languages: Option<LanguageUsage>,
}

impl RepoSummaryBuilder {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_commit_count(mut self, count: u64) -> Self {
        self.commit_count = Some(count);
        self
    }

    pub fn with_branch_count(mut self, count: usize) -> Self {
        self.branch_count = Some(count);
        self
    }

    pub fn with_contributors(mut self, contributors: Vec<Contributor>) -> Self {
        self.contributors = Some(contributors);
        self
    }

    pub fn with_languages(mut self, languages: Option<LanguageUsage>) -> Self {
        self.languages = languages;
        self
    }

    /// Build the RepoSummary with validation.
    #[track_caller]
    pub fn build(self) -> Result<RepoSummary, ModelError> {
        let name = self
            .name
            .ok_or_else(|| ModelError::validation("Repository name is required"))?;

        if name.trim().is_empty() {
            return Err(ModelError::validation("Repository name cannot be empty"));
        }

        let commit_count = self
            .commit_count
            .ok_or_else(|| ModelError::validation("Commit count is required"))?;

        let branch_count = self
            .branch_count
            .ok_or_else(|| ModelError::validation("Branch count is required"))?;

        let contributors = self
            .contributors
            .ok_or_else(|| ModelError::validation("Contributors are required"))?;

        let description = self
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION_PLACEHOLDER.to_string());

        Ok(RepoSummary {
            name,
            description,
            commit_count,
            branch_count,
            contributors,
            languages: self.languages,
        })
    }
}
