use crate::error::GitProfileError;

use models::{CommitRecord, RepoSummary};

use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock, mpsc, oneshot};

const STATE_CHANNEL_CAPACITY: usize = 32;

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "login")]
pub enum ViewState {
    /// Repository summary, contributor list and language chart
    Aggregate,

    /// Commits authored by one contributor
    ContributorDetail(String),
}

/// Everything the renderers read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub view: ViewState,
    pub loading: bool,
    pub summary: Option<RepoSummary>,
    pub contributor_commits: Vec<CommitRecord>,
    pub error: Option<String>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            view: ViewState::Aggregate,
            loading: false,
            summary: None,
            contributor_commits: Vec::new(),
            error: None,
        }
    }
}

/// Commands that mutate the view model.
///
/// Load results carry the generation they were started under; the actor
/// applies them only while that generation is still current.
#[derive(Debug, Clone)]
pub enum StateCommand {
    /// A new load began and superseded everything before it
    LoadStarted { generation: u64 },

    SummaryLoaded {
        generation: u64,
        summary: RepoSummary,
    },

    ContributorLoaded {
        generation: u64,
        login: String,
        commits: Vec<CommitRecord>,
    },

    LoadFailed { generation: u64, message: String },

    /// Back to the aggregate view, keeping the loaded summary
    ShowAggregate { generation: u64 },
}

impl StateCommand {
    fn generation(&self) -> u64 {
        match self {
            StateCommand::LoadStarted { generation }
            | StateCommand::SummaryLoaded { generation, .. }
            | StateCommand::ContributorLoaded { generation, .. }
            | StateCommand::LoadFailed { generation, .. }
            | StateCommand::ShowAggregate { generation } => *generation,
        }
    }
}

type Envelope = (StateCommand, oneshot::Sender<bool>);

/// View-state manager.
///
/// All mutations go through a single actor task, so a late result from an
/// abandoned load can never interleave with a newer one. Reads take the
/// `RwLock` directly.
#[derive(Clone)]
pub struct AppState {
    command_tx: Arc<Mutex<Option<mpsc::Sender<Envelope>>>>,
    model: Arc<RwLock<ViewModel>>,
    generation: Arc<Mutex<u64>>,
    actor_init: Arc<Mutex<bool>>,
}

impl AppState {
    /// The actor is spawned lazily on first use within a tokio runtime.
    pub fn new() -> Self {
        Self {
            command_tx: Arc::new(Mutex::new(None)),
            model: Arc::new(RwLock::new(ViewModel::default())),
            generation: Arc::new(Mutex::new(0)),
            actor_init: Arc::new(Mutex::new(false)),
        }
    }

    /// Start a new load generation; results of earlier loads become stale.
    pub async fn begin_load(&self) -> Result<u64, GitProfileError> {
        let generation = self.next_generation().await;
        self.update(StateCommand::LoadStarted { generation }).await?;
        Ok(generation)
    }

    /// Leave the contributor drill-down; a drill-down still loading is abandoned.
    pub async fn show_aggregate(&self) -> Result<(), GitProfileError> {
        let generation = self.next_generation().await;
        self.update(StateCommand::ShowAggregate { generation })
            .await?;
        Ok(())
    }

    /// Send a command and wait until the actor has handled it.
    ///
    /// Returns `Ok(false)` when the command belonged to a superseded
    /// generation and was dropped.
    pub async fn update(&self, cmd: StateCommand) -> Result<bool, GitProfileError> {
        self.ensure_actor().await;

        let tx = {
            let tx_guard = self.command_tx.lock().await;
            tx_guard
                .clone()
                .ok_or_else(|| GitProfileError::state("State actor not initialized"))?
        };

        let (ack_tx, ack_rx) = oneshot::channel();
        tx.send((cmd, ack_tx))
            .await
            .map_err(|e| GitProfileError::state(format!("State actor died: {e}")))?;

        ack_rx
            .await
            .map_err(|e| GitProfileError::state(format!("State actor dropped command: {e}")))
    }

    pub async fn snapshot(&self) -> ViewModel {
        self.model.read().await.clone()
    }

    pub async fn current_generation(&self) -> u64 {
        *self.generation.lock().await
    }

    async fn next_generation(&self) -> u64 {
        let mut generation = self.generation.lock().await;
        *generation += 1;
        *generation
    }

    async fn ensure_actor(&self) {
        let mut init_guard = self.actor_init.lock().await;
        if !*init_guard {
            let (tx, rx) = mpsc::channel(STATE_CHANNEL_CAPACITY);

            let mut tx_guard = self.command_tx.lock().await;
            *tx_guard = Some(tx);
            drop(tx_guard);

            tokio::spawn(state_actor(
                rx,
                Arc::clone(&self.model),
                Arc::clone(&self.generation),
            ));
            *init_guard = true;
            debug!("State actor spawned");
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns every write to the view model and processes commands in order.
async fn state_actor(
    mut command_rx: mpsc::Receiver<Envelope>,
    model: Arc<RwLock<ViewModel>>,
    generation: Arc<Mutex<u64>>,
) {
    while let Some((cmd, ack)) = command_rx.recv().await {
        let current = *generation.lock().await;
        let applied = if cmd.generation() == current {
            apply(&model, cmd).await;
            true
        } else {
            debug!(
                "Dropping stale state command (generation {} != {current})",
                cmd.generation()
            );
            false
        };

        // The sender may have given up waiting; nothing to do then
        let _ = ack.send(applied);
    }

    debug!("State actor stopped");
}

async fn apply(model: &RwLock<ViewModel>, cmd: StateCommand) {
    let mut model = model.write().await;

    match cmd {
        StateCommand::LoadStarted { generation } => {
            debug!("Load {generation} started");
            model.loading = true;
            model.error = None;
        }
        StateCommand::SummaryLoaded { summary, .. } => {
            info!("Showing summary for {}", summary.name);
            model.view = ViewState::Aggregate;
            model.loading = false;
            model.summary = Some(summary);
            model.contributor_commits.clear();
        }
        StateCommand::ContributorLoaded { login, commits, .. } => {
            info!("Showing {} commits by {login}", commits.len());
            model.view = ViewState::ContributorDetail(login);
            model.loading = false;
            model.contributor_commits = commits;
        }
        StateCommand::LoadFailed { message, .. } => {
            warn!("Load failed: {message}");
            model.loading = false;
            model.error = Some(message);
        }
        StateCommand::ShowAggregate { .. } => {
            model.view = ViewState::Aggregate;
            model.loading = false;
            model.error = None;
            model.contributor_commits.clear();
        }
    }
}
