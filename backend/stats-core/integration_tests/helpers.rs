//! Test helpers for stats client integration tests.
//!
//! Every test runs against its own wiremock server; the client is pointed at
//! it through `ApiConfig::base_url`, exactly as a GitHub Enterprise host would be.

use common::RedactedToken;
use models::Credentials;
use stats_core::RepoStatsClient;
use stats_core::config::ApiConfig;

use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "ghp_integrationTestToken123";
pub const TEST_OWNER: &str = "octo";
pub const TEST_REPO: &str = "hello";

/// Header value every request must carry.
pub fn expected_authorization() -> String {
    format!("token {TEST_TOKEN}")
}

pub fn credentials() -> Credentials {
    Credentials::new(TEST_OWNER, TEST_REPO, RedactedToken::new(TEST_TOKEN))
        .expect("test credentials are valid")
}

pub fn client_for(server: &MockServer) -> RepoStatsClient {
    let config = ApiConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..ApiConfig::default()
    };
    RepoStatsClient::from_config(&config).expect("client should build for mock server")
}

/// `/repos/octo/hello{suffix}`
pub fn repo_path(suffix: &str) -> String {
    format!("/repos/{TEST_OWNER}/{TEST_REPO}{suffix}")
}

/// Absolute URL on the mock server, as GitHub would put it in a Link header.
pub fn absolute_url(server: &MockServer, path_and_query: &str) -> String {
    format!("{}{}", server.uri(), path_and_query)
}

pub fn commit(sha: &str) -> Value {
    json!({
        "sha": sha,
        "commit": {
            "message": format!("Commit {sha}\n\nbody"),
            "author": {"name": "Test", "date": "2024-01-01T00:00:00Z"}
        }
    })
}

/// `count` commits with SHAs `{prefix}-0 .. {prefix}-{count-1}`.
pub fn commits(prefix: &str, count: usize) -> Vec<Value> {
    (0..count).map(|i| commit(&format!("{prefix}-{i}"))).collect()
}

pub fn branches(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({"name": format!("branch-{i}"), "protected": false}))
        .collect()
}
