//! Command-line arguments.

use crate::error::GitProfileError;
use crate::remote::parse_github_remote;

use stats_core::config::default_config_dir;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

const APP_DIR_NAME: &str = "git-profile";
const LOG_DIR_NAME: &str = "logs";

/// Output formats the binary can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
}

/// Statistics for a GitHub repository: commits, branches, contributors and
/// language breakdown.
///
/// The token is read from GITHUB_TOKEN (a `.env` file in the working
/// directory is honored).
#[derive(Debug, Clone, Parser)]
#[command(name = "git-profile", version)]
pub struct Cli {
    /// Repository owner (user or organization)
    #[arg(long, value_name = "OWNER", requires = "repo", conflicts_with = "remote_url")]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long, value_name = "REPO", requires = "owner")]
    pub repo: Option<String>,

    /// Git remote URL to take owner and repository from
    #[arg(long, value_name = "URL", env = "GIT_PROFILE_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// Show the commits of one contributor instead of the summary
    #[arg(long, value_name = "LOGIN")]
    pub contributor: Option<String>,

    /// Directory holding config.json
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Directory for git-profile.log
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Write the rendered view here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// `(owner, repo)` from `--owner/--repo`, else from `--remote-url`.
    pub fn repository(&self) -> Result<(String, String), GitProfileError> {
        match (&self.owner, &self.repo, &self.remote_url) {
            (Some(owner), Some(repo), _) => Ok((owner.clone(), repo.clone())),
            (_, _, Some(remote_url)) => parse_github_remote(remote_url),
            _ => Err(GitProfileError::not_configured(
                "No repository given; pass --owner and --repo, or --remote-url",
            )),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, GitProfileError> {
        match &self.config_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(default_config_dir()?),
        }
    }

    /// `--log-dir`, else the platform data directory, else the temp directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR_NAME)
                .join(LOG_DIR_NAME)
        })
    }
}
