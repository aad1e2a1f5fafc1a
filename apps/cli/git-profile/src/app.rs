//! One run of the application: resolve inputs, load, hand back the view.

use crate::cli::Cli;
use crate::error::GitProfileError;
use crate::loader::{spawn_contributor_load, spawn_summary_load};
use crate::state::{AppState, ViewModel};

use common::RedactedToken;
use models::Credentials;
use stats_core::RepoStatsClient;
use stats_core::config::StatsConfig;

use std::path::Path;

use log::info;
use tokio::task::JoinHandle;

/// Load the aggregate view and, if `--contributor` was given, drill down.
///
/// Load failures do not make this return `Err`: they end up in
/// [`ViewModel::error`] so the caller can render them. `Err` is reserved for
/// inputs that never allowed a load to start.
pub async fn run(
    cli: &Cli,
    config: &StatsConfig,
    token: RedactedToken,
) -> Result<ViewModel, GitProfileError> {
    let (owner, repo) = cli.repository()?;
    let credentials = Credentials::new(owner, repo, token)
        .map_err(|e| GitProfileError::not_configured(e.to_string()))?;
    let client = RepoStatsClient::from_config(&config.api)?;
    let state = AppState::new();

    let summary_load = spawn_summary_load(
        &state,
        client.clone(),
        credentials.clone(),
        config.display.description_placeholder.clone(),
    )
    .await?;
    wait_for(summary_load).await?;

    if let Some(login) = &cli.contributor {
        if state.snapshot().await.error.is_none() {
            let contributor_load =
                spawn_contributor_load(&state, client, credentials, login.clone()).await?;
            wait_for(contributor_load).await?;
        }
    }

    Ok(state.snapshot().await)
}

/// Write rendered output to `path`, or to stdout when `None`.
pub async fn write_output(path: Option<&Path>, rendered: &str) -> Result<(), GitProfileError> {
    match path {
        Some(path) => {
            tokio::fs::write(path, rendered).await.map_err(|e| {
                GitProfileError::render(format!("Failed to write {}: {e}", path.display()))
            })?;
            info!("Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

async fn wait_for(load: JoinHandle<()>) -> Result<(), GitProfileError> {
    load.await
        .map_err(|e| GitProfileError::state(format!("Load task failed: {e}")))
}
