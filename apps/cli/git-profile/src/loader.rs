//! Sequencing of statistics calls into view data.
//!
//! Loads run as spawned tasks tagged with the generation handed out by
//! [`AppState::begin_load`]; the state actor drops any result whose
//! generation has been superseded.

use crate::error::GitProfileError;
use crate::state::{AppState, StateCommand};

use models::{CommitRecord, Credentials, RepoSummary, RepoSummaryBuilder};
use stats_core::RepoStatsClient;

use log::{error, info, warn};
use tokio::task::JoinHandle;

/// Fetch everything the aggregate view shows.
///
/// Calls run strictly in sequence: name, description, commit count,
/// branches, contributors, languages. A failed or missing description is
/// replaced by `description_placeholder`; a missing name falls back to the
/// repository part of the credentials. Any other failure aborts the load.
pub async fn load_summary(
    client: &RepoStatsClient,
    credentials: &Credentials,
    description_placeholder: &str,
) -> Result<RepoSummary, GitProfileError> {
    let full_name = credentials.full_name();
    info!("Loading statistics for {full_name}");

    let name = match client.get_repo_name(credentials).await? {
        Some(name) if !name.trim().is_empty() => name,
        _ => {
            warn!("{full_name}: repository has no name, using '{}'", credentials.repo());
            credentials.repo().to_string()
        }
    };

    let description = match client.get_repo_description(credentials).await {
        Ok(Some(description)) if !description.trim().is_empty() => description,
        Ok(_) => description_placeholder.to_string(),
        Err(e) => {
            warn!(
                "{full_name}: description unavailable ({}), using placeholder",
                e.error_category()
            );
            description_placeholder.to_string()
        }
    };

    let commit_count = client.get_commit_count(credentials).await?;
    let branch_count = client.get_branch_count(credentials).await?;
    let contributors = client.get_contributors(credentials).await?;
    let languages = client.get_language_usage(credentials).await?;

    let summary = RepoSummaryBuilder::default()
        .with_name(name)
        .with_description(description)
        .with_commit_count(commit_count)
        .with_branch_count(branch_count)
        .with_contributors(contributors)
        .with_languages(languages)
        .build()?;

    info!(
        "{full_name}: {} commits, {} branches, {} contributors",
        summary.commit_count,
        summary.branch_count,
        summary.contributor_count()
    );

    Ok(summary)
}

/// Every commit `login` authored, for the contributor drill-down.
pub async fn load_contributor_commits(
    client: &RepoStatsClient,
    credentials: &Credentials,
    login: &str,
) -> Result<Vec<CommitRecord>, GitProfileError> {
    info!("Loading commits by {login} in {}", credentials.full_name());
    let commits = client
        .get_all_commits_by_contributor(credentials, login)
        .await?;
    Ok(commits)
}

/// Start an aggregate load in the background.
///
/// Supersedes any load in flight. The outcome is delivered to `state` as
/// [`StateCommand::SummaryLoaded`] or [`StateCommand::LoadFailed`].
pub async fn spawn_summary_load(
    state: &AppState,
    client: RepoStatsClient,
    credentials: Credentials,
    description_placeholder: String,
) -> Result<JoinHandle<()>, GitProfileError> {
    let generation = state.begin_load().await?;
    let state = state.clone();

    Ok(tokio::spawn(async move {
        let command = match load_summary(&client, &credentials, &description_placeholder).await
        {
            Ok(summary) => StateCommand::SummaryLoaded {
                generation,
                summary,
            },
            Err(e) => StateCommand::LoadFailed {
                generation,
                message: e.to_string(),
            },
        };
        deliver(&state, command).await;
    }))
}

/// Start a contributor drill-down load in the background.
pub async fn spawn_contributor_load(
    state: &AppState,
    client: RepoStatsClient,
    credentials: Credentials,
    login: String,
) -> Result<JoinHandle<()>, GitProfileError> {
    let generation = state.begin_load().await?;
    let state = state.clone();

    Ok(tokio::spawn(async move {
        let command = match load_contributor_commits(&client, &credentials, &login).await {
            Ok(commits) => StateCommand::ContributorLoaded {
                generation,
                login,
                commits,
            },
            Err(e) => StateCommand::LoadFailed {
                generation,
                message: e.to_string(),
            },
        };
        deliver(&state, command).await;
    }))
}

async fn deliver(state: &AppState, command: StateCommand) {
    if let Err(e) = state.update(command).await {
        error!("Load result could not be delivered: {e}");
    }
}
