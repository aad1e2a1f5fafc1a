//! Mock GitHub for end-to-end runs of the application.

use git_profile::cli::Cli;

use common::RedactedToken;
use models::Credentials;
use stats_core::RepoStatsClient;
use stats_core::config::{ApiConfig, StatsConfig};

use clap::Parser;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "ghp_appIntegrationToken456";
pub const TEST_OWNER: &str = "octo";
pub const TEST_REPO: &str = "hello";
pub const NEWEST_SHA: &str = "c000000newest";
pub const OLDEST_SHA: &str = "c999999oldest";

pub fn token() -> RedactedToken {
    RedactedToken::new(TEST_TOKEN)
}

pub fn credentials() -> Credentials {
    Credentials::new(TEST_OWNER, TEST_REPO, token()).expect("test credentials are valid")
}

pub fn config_for(server: &MockServer) -> StatsConfig {
    StatsConfig {
        api: ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            ..ApiConfig::default()
        },
        ..StatsConfig::default()
    }
}

pub fn client_for(server: &MockServer) -> RepoStatsClient {
    RepoStatsClient::from_config(&config_for(server).api).expect("client should build")
}

pub fn cli(extra: &[&str]) -> Cli {
    let args = ["git-profile", "--owner", TEST_OWNER, "--repo", TEST_REPO];
    Cli::try_parse_from(args.iter().chain(extra.iter())).expect("test arguments are valid")
}

pub fn repo_path(suffix: &str) -> String {
    format!("/repos/{TEST_OWNER}/{TEST_REPO}{suffix}")
}

pub fn commit(sha: &str, message: &str) -> Value {
    json!({"sha": sha, "commit": {"message": message}})
}

pub async fn mount_repo(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(repo_path("")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Single-page listing: newest first, oldest last, compare says 2 ahead.
pub async fn mount_commits(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            commit(NEWEST_SHA, "Newest"),
            commit("c500000middle", "Middle"),
            commit(OLDEST_SHA, "Initial commit"),
        ])))
        .with_priority(10)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(repo_path(&format!("/compare/{OLDEST_SHA}...{NEWEST_SHA}"))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total_commits": 2})))
        .mount(server)
        .await;
}

pub async fn mount_branches(server: &MockServer, count: usize) {
    let branches: Vec<Value> = (0..count)
        .map(|i| json!({"name": format!("branch-{i}")}))
        .collect();
    Mock::given(method("GET"))
        .and(path(repo_path("/branches")))
        .respond_with(ResponseTemplate::new(200).set_body_json(branches))
        .mount(server)
        .await;
}

pub async fn mount_contributors(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(repo_path("/contributors")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"login": "alice", "contributions": 2},
            {"login": "bob", "contributions": 1}
        ])))
        .mount(server)
        .await;
}

pub async fn mount_languages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(repo_path("/languages")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"Rust": 750, "Shell": 250})),
        )
        .mount(server)
        .await;
}

/// Two commits by `login` on page 1, nothing on page 2.
pub async fn mount_contributor_commits(server: &MockServer, login: &str) {
    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .and(query_param("author", login))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            commit("a1a1a1a1a1a1", "Fix parser"),
            commit("a2a2a2a2a2a2", "Add tests"),
        ])))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .and(query_param("author", login))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(1)
        .mount(server)
        .await;
}

/// A complete, healthy repository.
pub async fn mount_healthy_repository(server: &MockServer) {
    mount_repo(
        server,
        json!({"name": "hello", "description": "My first repository"}),
    )
    .await;
    mount_commits(server).await;
    mount_branches(server, 2).await;
    mount_contributors(server).await;
    mount_languages(server).await;
}
