use crate::helpers::{TEST_TOKEN, client_for, commit, credentials, repo_path};

use stats_core::RepoStatsClient;
use stats_core::config::ApiConfig;
use stats_core::error::StatsClientError;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Failure surfacing: status codes, bodies, transport
// ============================================================================

/// **VALUE**: Verifies 404 and 403 surface as RequestFailed carrying the status.
///
/// **WHY THIS MATTERS**: A typo in owner/repo (404) and an exhausted rate limit or a
/// token without scope (403) need different user actions; the status is how the UI
/// tells them apart.
///
/// **BUG THIS CATCHES**: Would catch non-2xx bodies being parsed as data (GitHub error
/// bodies are JSON objects and would otherwise "succeed" for object endpoints).
#[tokio::test]
async fn given_not_found_or_forbidden_when_fetching_then_returns_request_failed_with_status() {
    // GIVEN: A repo endpoint that 404s and a branches endpoint that 403s
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(repo_path("/branches")))
        .respond_with(ResponseTemplate::new(403).set_body_json(
            json!({"message": "API rate limit exceeded"}),
        ))
        .mount(&server)
        .await;
    let client = client_for(&server);

    // WHEN: Calling both operations
    let name_err = client.get_repo_name(&credentials()).await.unwrap_err();
    let branch_err = client.get_branch_count(&credentials()).await.unwrap_err();

    // THEN: Typed failures with statuses
    match name_err {
        StatsClientError::RequestFailed {
            status, endpoint, ..
        } => {
            assert_eq!(status.0, 404);
            assert!(endpoint.ends_with(&repo_path("")), "endpoint: {endpoint}");
        }
        other => panic!("Expected RequestFailed, got {other:?}"),
    }
    assert_eq!(branch_err.status_code(), Some(403));
}

/// **VALUE**: Verifies the token never appears in a failure message.
///
/// **WHY THIS MATTERS**: Failure messages are logged to file and shown to the user.
///
/// **BUG THIS CATCHES**: Would catch endpoints or debug output being built with the
/// Authorization value in them.
#[tokio::test]
async fn given_unauthorized_when_formatting_error_then_token_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_contributors(&credentials())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert!(!err.to_string().contains(TEST_TOKEN));
    assert!(!format!("{err:?}").contains(TEST_TOKEN));
}

#[tokio::test]
async fn given_failing_compare_when_counting_commits_then_returns_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([commit("only")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(repo_path("/compare/only...only")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_commit_count(&credentials())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn given_invalid_json_body_when_fetching_then_returns_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_repo_name(&credentials())
        .await
        .unwrap_err();

    assert!(err.is_malformed_response(), "got {err}");
}

#[tokio::test]
async fn given_object_where_array_expected_when_counting_branches_then_returns_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("/branches")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "main"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_branch_count(&credentials())
        .await
        .unwrap_err();

    assert!(err.is_malformed_response(), "got {err}");
}

/// **VALUE**: Verifies an unreachable host surfaces as a Transport error, not a panic.
///
/// **WHY THIS MATTERS**: Offline laptops and firewalled CI are common; the caller
/// must get an error it can display.
///
/// **BUG THIS CATCHES**: Would catch `unwrap()` on the send future.
#[tokio::test]
async fn given_unreachable_host_when_fetching_then_returns_transport_error() {
    // GIVEN: A client pointed at a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let client = RepoStatsClient::from_config(&ApiConfig {
        base_url,
        timeout_secs: 2,
        ..ApiConfig::default()
    })
    .unwrap();

    // WHEN: Fetching
    let err = client.get_repo_name(&credentials()).await.unwrap_err();

    // THEN: Transport failure without a status
    assert!(
        matches!(err, StatsClientError::Transport { .. }),
        "got {err:?}"
    );
    assert_eq!(err.status_code(), None);
}

#[test]
fn given_invalid_base_url_when_building_client_then_returns_url_parse_error() {
    let result = RepoStatsClient::from_config(&ApiConfig {
        base_url: "not a url".to_string(),
        ..ApiConfig::default()
    });

    assert!(matches!(result, Err(StatsClientError::UrlParse { .. })));
}

#[test]
fn given_default_client_when_built_then_targets_public_api() {
    let client = RepoStatsClient::new().unwrap();

    assert_eq!(client.base_url().as_str(), "https://api.github.com/");
}
