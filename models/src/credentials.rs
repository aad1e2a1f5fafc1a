//! Who to ask GitHub about, and with what token.

use crate::ModelError;

use common::RedactedToken;

/// Repository coordinates plus the token every request is signed with.
///
/// `owner` and `repo` are validated non-empty; the token is passed through
/// untouched (an empty token surfaces later as a 401 from the API).
#[derive(Debug, Clone)]
pub struct Credentials {
    owner: String,
    repo: String,
    token: RedactedToken,
}

impl Credentials {
    #[track_caller]
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: RedactedToken,
    ) -> Result<Self, ModelError> {
        let owner = owner.into();
        let repo = repo.into();

        if owner.trim().is_empty() {
            return Err(ModelError::validation("Repository owner cannot be empty"));
        }

        if repo.trim().is_empty() {
            return Err(ModelError::validation("Repository name cannot be empty"));
        }

        if owner.contains('/') || repo.contains('/') {
            return Err(ModelError::validation(format!(
                "Owner and repository must not contain '/': {owner}/{repo}"
            )));
        }

        Ok(Self { owner, repo, token })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn token(&self) -> &RedactedToken {
        &self.token
    }

    /// `owner/repo`, as GitHub writes it.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
