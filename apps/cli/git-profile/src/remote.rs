//! Owner and repository from a git remote URL.
//!
//! Accepts the forms GitHub hands out:
//! - `https://github.com/octo/hello.git`
//! - `git@github.com:octo/hello.git`
//! - `ssh://git@github.com/octo/hello`
//!
//! Only the string is inspected; nothing is read from a local `.git`.

use crate::error::GitProfileError;

use std::sync::OnceLock;

use regex::Regex;

const GITHUB_REMOTE_PATTERN: &str = r"github\.com[:/]([^/]+)/([^/]+?)(?:\.git)?/?$";

static GITHUB_REMOTE: OnceLock<Regex> = OnceLock::new();

fn github_remote() -> &'static Regex {
    GITHUB_REMOTE.get_or_init(|| Regex::new(GITHUB_REMOTE_PATTERN).expect("valid regex pattern"))
}

/// Split a GitHub remote URL into `(owner, repo)`.
///
/// # Errors
///
/// [`GitProfileError::NotConfigured`] when the URL does not point at a
/// repository on github.com.
pub fn parse_github_remote(remote_url: &str) -> Result<(String, String), GitProfileError> {
    let remote_url = remote_url.trim();

    let captures = github_remote().captures(remote_url).ok_or_else(|| {
        GitProfileError::not_configured(format!("Not a GitHub remote URL: {remote_url}"))
    })?;

    match (captures.get(1), captures.get(2)) {
        (Some(owner), Some(repo)) if !repo.as_str().is_empty() => {
            Ok((owner.as_str().to_string(), repo.as_str().to_string()))
        }
        _ => Err(GitProfileError::not_configured(format!(
            "Remote URL has no owner/repository: {remote_url}"
        ))),
    }
}
