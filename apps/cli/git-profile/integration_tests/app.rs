use crate::helpers::{
    TEST_TOKEN, cli, config_for, mount_contributor_commits, mount_healthy_repository, repo_path,
    token,
};

use git_profile::app::{run, write_output};
use git_profile::cli::Cli;
use git_profile::error::GitProfileError;
use git_profile::state::ViewState;
use git_profile::view::render;

use clap::Parser;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: A full run against a healthy repository renders the aggregate page.
///
/// **WHY THIS MATTERS**: Exercises argument resolution, client config, the loader
/// task, the state actor and the renderer together, the way the binary does.
///
/// **BUG THIS CATCHES**: Would catch the load result never reaching the state actor
/// (e.g. a generation mismatch between spawn and delivery).
#[tokio::test]
async fn given_healthy_repository_when_running_then_aggregate_page_rendered() {
    // GIVEN: A healthy repository
    let server = MockServer::start().await;
    mount_healthy_repository(&server).await;
    let cli = cli(&[]);

    // WHEN: Running and rendering HTML
    let model = run(&cli, &config_for(&server), token()).await.unwrap();
    let html = render(&model, cli.format).unwrap();

    // THEN: Aggregate view with all statistics
    assert_eq!(model.view, ViewState::Aggregate);
    assert!(model.error.is_none());
    assert!(!model.loading);
    assert!(html.contains("<h1>hello</h1>"));
    assert!(html.contains("<tr><td>Total Commits:</td><td>3</td></tr>"));
    assert!(html.contains("<tr><td>Number of Branches:</td><td>2</td></tr>"));
    assert!(html.contains("<tr><td>Number of Contributors:</td><td>2</td></tr>"));
    assert!(html.contains("Rust (75.0%)"));
}

#[tokio::test]
async fn given_contributor_flag_when_running_then_detail_view_rendered() {
    let server = MockServer::start().await;
    mount_healthy_repository(&server).await;
    mount_contributor_commits(&server, "alice").await;
    let cli = cli(&["--contributor", "alice"]);

    let model = run(&cli, &config_for(&server), token()).await.unwrap();
    let html = render(&model, cli.format).unwrap();

    assert_eq!(model.view, ViewState::ContributorDetail("alice".to_string()));
    assert!(html.contains("<h1>Statistics for alice</h1>"));
    assert!(html.contains("<p>Total Commits: 2</p>"));
    assert!(html.contains("<li><code>a1a1a1a</code> Fix parser</li>"));
}

/// **VALUE**: A failed load ends up in the view model as an error, not as a panic or
/// an `Err` that skips rendering.
///
/// **WHY THIS MATTERS**: The error page replaces the original error dialog; it has
/// to carry the status so the user can tell "no such repo" from "bad token".
///
/// **BUG THIS CATCHES**: Would catch the token leaking into the rendered error.
#[tokio::test]
async fn given_missing_repository_when_running_then_error_view_without_token() {
    // GIVEN: The repository does not exist
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let cli = cli(&[]);

    // WHEN: Running
    let model = run(&cli, &config_for(&server), token()).await.unwrap();
    let html = render(&model, cli.format).unwrap();

    // THEN: Error recorded and rendered, token nowhere
    let error = model.error.as_deref().expect("load should fail");
    assert!(error.contains("404"));
    assert!(html.contains("<title>Error</title>"));
    assert!(!error.contains(TEST_TOKEN));
    assert!(!html.contains(TEST_TOKEN));
}

#[tokio::test]
async fn given_failed_summary_when_contributor_requested_then_drill_down_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let cli = cli(&["--contributor", "alice"]);

    let model = run(&cli, &config_for(&server), token()).await.unwrap();

    assert_eq!(model.view, ViewState::Aggregate);
    assert!(model.error.is_some());
    // Only the repository request; no contributor pages were fetched
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_non_github_remote_when_running_then_not_configured_without_requests() {
    let server = MockServer::start().await;
    let cli = Cli::try_parse_from([
        "git-profile",
        "--remote-url",
        "https://gitlab.com/octo/hello.git",
    ])
    .unwrap();

    let err = run(&cli, &config_for(&server), token()).await.unwrap_err();

    assert!(matches!(err, GitProfileError::NotConfigured { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_json_format_and_output_file_when_writing_then_file_holds_summary() {
    // GIVEN: A healthy repository and an output file
    let server = MockServer::start().await;
    mount_healthy_repository(&server).await;
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("stats.json");
    let cli = cli(&["--format", "json", "--output", out_path.to_str().unwrap()]);

    // WHEN: Running, rendering and writing
    let model = run(&cli, &config_for(&server), token()).await.unwrap();
    let rendered = render(&model, cli.format).unwrap();
    write_output(cli.output.as_deref(), &rendered).await.unwrap();

    // THEN: The file parses as the summary
    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(written["name"], "hello");
    assert_eq!(written["commit_count"], 3);
}
