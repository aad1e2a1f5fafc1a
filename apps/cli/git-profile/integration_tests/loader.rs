use crate::helpers::{
    client_for, credentials, mount_branches, mount_commits, mount_contributors,
    mount_healthy_repository, mount_languages, mount_repo, repo_path,
};

use git_profile::error::GitProfileError;
use git_profile::loader::{load_contributor_commits, load_summary};

use models::summary::builder::NO_DESCRIPTION_PLACEHOLDER;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount everything except the repository object.
async fn mount_statistics(server: &MockServer) {
    mount_commits(server).await;
    mount_branches(server, 2).await;
    mount_contributors(server).await;
    mount_languages(server).await;
}

/// **VALUE**: A healthy repository loads into a complete summary.
///
/// **WHY THIS MATTERS**: This is the aggregate view's data in one call; each field
/// comes from a different endpoint.
///
/// **BUG THIS CATCHES**: Would catch a field wired to the wrong client operation.
#[tokio::test]
async fn given_healthy_repository_when_loading_summary_then_all_fields_filled() {
    // GIVEN: Every endpoint answering
    let server = MockServer::start().await;
    mount_healthy_repository(&server).await;

    // WHEN: Loading
    let summary = load_summary(&client_for(&server), &credentials(), NO_DESCRIPTION_PLACEHOLDER)
        .await
        .unwrap();

    // THEN: Counts from each endpoint
    assert_eq!(summary.name, "hello");
    assert_eq!(summary.description, "My first repository");
    assert_eq!(summary.commit_count, 3);
    assert_eq!(summary.branch_count, 2);
    assert_eq!(
        summary.contributor_logins().collect::<Vec<_>>(),
        vec!["alice", "bob"]
    );
    let languages = summary.languages.expect("languages present");
    assert_eq!(languages.percentage("Rust"), Some(75.0));
}

#[tokio::test]
async fn given_null_description_when_loading_summary_then_placeholder_used() {
    let server = MockServer::start().await;
    mount_repo(&server, json!({"name": "hello", "description": null})).await;
    mount_statistics(&server).await;

    let summary = load_summary(&client_for(&server), &credentials(), "Nothing here")
        .await
        .unwrap();

    assert_eq!(summary.description, "Nothing here");
}

/// **VALUE**: A description that cannot be fetched falls back to the placeholder
/// while everything else still loads.
///
/// **WHY THIS MATTERS**: The description is decoration; a flaky second repository
/// call must not cost the user the whole view.
///
/// **BUG THIS CATCHES**: Would catch the description error being propagated with `?`.
#[tokio::test]
async fn given_description_request_fails_when_loading_summary_then_placeholder_used() {
    // GIVEN: First repository call answers, the second one fails
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "hello"})))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(repo_path("")))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(5)
        .mount(&server)
        .await;
    mount_statistics(&server).await;

    // WHEN: Loading
    let summary = load_summary(&client_for(&server), &credentials(), NO_DESCRIPTION_PLACEHOLDER)
        .await
        .unwrap();

    // THEN: Placeholder, rest intact
    assert_eq!(summary.name, "hello");
    assert_eq!(summary.description, NO_DESCRIPTION_PLACEHOLDER);
    assert_eq!(summary.branch_count, 2);
}

#[tokio::test]
async fn given_repository_without_name_when_loading_summary_then_repo_name_used() {
    let server = MockServer::start().await;
    mount_repo(&server, json!({"description": "Nameless"})).await;
    mount_statistics(&server).await;

    let summary = load_summary(&client_for(&server), &credentials(), NO_DESCRIPTION_PLACEHOLDER)
        .await
        .unwrap();

    assert_eq!(summary.name, "hello");
}

/// **VALUE**: Any failure other than the description aborts the load.
///
/// **BUG THIS CATCHES**: Would catch a loader that silently reports 0 branches when
/// the branch listing fails.
#[tokio::test]
async fn given_branches_request_fails_when_loading_summary_then_core_error() {
    // GIVEN: Branch listing forbidden
    let server = MockServer::start().await;
    mount_repo(&server, json!({"name": "hello"})).await;
    mount_commits(&server).await;
    Mock::given(method("GET"))
        .and(path(repo_path("/branches")))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    // WHEN: Loading
    let err = load_summary(&client_for(&server), &credentials(), NO_DESCRIPTION_PLACEHOLDER)
        .await
        .unwrap_err();

    // THEN: Core error with the status
    assert!(matches!(err, GitProfileError::Core { .. }));
    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn given_contributor_with_commits_when_loading_then_all_pages_collected() {
    let server = MockServer::start().await;
    mount_commits(&server).await;
    crate::helpers::mount_contributor_commits(&server, "alice").await;

    let commits = load_contributor_commits(&client_for(&server), &credentials(), "alice")
        .await
        .unwrap();

    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].subject(), Some("Fix parser"));
}
