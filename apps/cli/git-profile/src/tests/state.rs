// Unit tests for the view-state actor
// Focus: generation tagging, so a superseded load can never overwrite a newer view

use crate::state::{AppState, StateCommand, ViewState};

use models::{CommitRecord, Contributor, RepoSummary, RepoSummaryBuilder};

use serde_json::{Map, Value, json};

fn summary(name: &str) -> RepoSummary {
    RepoSummaryBuilder::default()
        .with_name(name)
        .with_commit_count(3)
        .with_branch_count(1)
        .with_contributors(vec![Contributor::new("alice")])
        .build()
        .unwrap()
}

fn record(sha: &str) -> CommitRecord {
    let mut fields = Map::new();
    fields.insert("sha".to_string(), Value::String(sha.to_string()));
    fields.insert("commit".to_string(), json!({"message": "Fix"}));
    CommitRecord::new(fields)
}

#[tokio::test]
async fn given_new_state_when_snapshot_then_aggregate_without_data() {
    let state = AppState::new();

    let model = state.snapshot().await;

    assert_eq!(model.view, ViewState::Aggregate);
    assert!(!model.loading);
    assert!(model.summary.is_none());
    assert!(model.error.is_none());
}

#[tokio::test]
async fn given_load_started_when_summary_arrives_then_aggregate_shows_it() {
    // GIVEN: A load in flight
    let state = AppState::new();
    let generation = state.begin_load().await.unwrap();
    assert!(state.snapshot().await.loading);

    // WHEN: Its result arrives
    let applied = state
        .update(StateCommand::SummaryLoaded {
            generation,
            summary: summary("hello"),
        })
        .await
        .unwrap();

    // THEN: Applied and visible
    assert!(applied);
    let model = state.snapshot().await;
    assert!(!model.loading);
    assert_eq!(model.view, ViewState::Aggregate);
    assert_eq!(model.summary.map(|s| s.name).as_deref(), Some("hello"));
}

/// **VALUE**: A result from a superseded load is dropped.
///
/// **WHY THIS MATTERS**: Loads are several sequential HTTP calls. If the user starts
/// a second load, the slower first one may finish last and would otherwise
/// overwrite the newer view with stale data.
///
/// **BUG THIS CATCHES**: Would catch the actor applying commands without comparing
/// generations, or comparing against the command's own generation.
#[tokio::test]
async fn given_superseded_load_when_its_result_arrives_then_ignored() {
    // GIVEN: Load 1 superseded by load 2
    let state = AppState::new();
    let stale = state.begin_load().await.unwrap();
    let current = state.begin_load().await.unwrap();
    assert!(current > stale);

    // WHEN: Load 2 finishes first, then load 1
    state
        .update(StateCommand::SummaryLoaded {
            generation: current,
            summary: summary("fresh"),
        })
        .await
        .unwrap();
    let applied = state
        .update(StateCommand::SummaryLoaded {
            generation: stale,
            summary: summary("stale"),
        })
        .await
        .unwrap();

    // THEN: The stale result is dropped
    assert!(!applied);
    let model = state.snapshot().await;
    assert_eq!(model.summary.map(|s| s.name).as_deref(), Some("fresh"));
}

#[tokio::test]
async fn given_contributor_loaded_when_applied_then_detail_view_keeps_summary() {
    let state = AppState::new();
    let generation = state.begin_load().await.unwrap();
    state
        .update(StateCommand::SummaryLoaded {
            generation,
            summary: summary("hello"),
        })
        .await
        .unwrap();

    let generation = state.begin_load().await.unwrap();
    state
        .update(StateCommand::ContributorLoaded {
            generation,
            login: "alice".to_string(),
            commits: vec![record("aaa"), record("bbb")],
        })
        .await
        .unwrap();

    let model = state.snapshot().await;
    assert_eq!(model.view, ViewState::ContributorDetail("alice".to_string()));
    assert_eq!(model.contributor_commits.len(), 2);
    assert!(model.summary.is_some(), "summary survives the drill-down");
}

/// **VALUE**: Going back to the aggregate view abandons a drill-down in flight.
///
/// **BUG THIS CATCHES**: Would catch `show_aggregate` not bumping the generation, so
/// a late contributor result would yank the user back into the detail view.
#[tokio::test]
async fn given_drill_down_in_flight_when_showing_aggregate_then_late_result_ignored() {
    // GIVEN: A contributor load started
    let state = AppState::new();
    let drill_down = state.begin_load().await.unwrap();

    // WHEN: The user goes back, then the drill-down finishes
    state.show_aggregate().await.unwrap();
    let applied = state
        .update(StateCommand::ContributorLoaded {
            generation: drill_down,
            login: "alice".to_string(),
            commits: vec![record("aaa")],
        })
        .await
        .unwrap();

    // THEN: Still on the aggregate view
    assert!(!applied);
    let model = state.snapshot().await;
    assert_eq!(model.view, ViewState::Aggregate);
    assert!(model.contributor_commits.is_empty());
    assert!(!model.loading);
}

#[tokio::test]
async fn given_load_failed_when_applied_then_error_recorded_and_next_load_clears_it() {
    let state = AppState::new();
    let generation = state.begin_load().await.unwrap();

    state
        .update(StateCommand::LoadFailed {
            generation,
            message: "HTTP 404".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(state.snapshot().await.error.as_deref(), Some("HTTP 404"));

    state.begin_load().await.unwrap();
    assert!(state.snapshot().await.error.is_none());
}

#[tokio::test]
async fn given_cloned_state_when_updated_through_clone_then_original_sees_change() {
    let state = AppState::new();
    let clone = state.clone();

    let generation = clone.begin_load().await.unwrap();
    clone
        .update(StateCommand::SummaryLoaded {
            generation,
            summary: summary("shared"),
        })
        .await
        .unwrap();

    assert_eq!(state.current_generation().await, generation);
    assert_eq!(
        state.snapshot().await.summary.map(|s| s.name).as_deref(),
        Some("shared")
    );
}
