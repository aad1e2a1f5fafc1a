use crate::helpers::{client_for, credentials, repo_path};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_with_languages(body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("/languages")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn given_byte_counts_when_getting_language_usage_then_returns_percentages() {
    // GIVEN: 300/100/100 bytes
    let server = server_with_languages(json!({"Kotlin": 300, "Java": 100, "HTML": 100})).await;

    // WHEN: Fetching usage
    let usage = client_for(&server)
        .get_language_usage(&credentials())
        .await
        .unwrap()
        .expect("languages present");

    // THEN: 60/20/20, summing to 100
    assert_eq!(usage.percentage("Kotlin"), Some(60.0));
    assert_eq!(usage.percentage("Java"), Some(20.0));
    assert_eq!(usage.percentage("HTML"), Some(20.0));
    let sum: f64 = usage.iter().map(|(_, share)| share).sum();
    assert!((sum - 100.0).abs() < 1e-9);
}

/// **VALUE**: Verifies `{}` fails with MalformedResponse rather than NaN percentages.
///
/// **WHY THIS MATTERS**: Freshly created or docs-only repositories report no languages.
/// NaN would propagate into the chart geometry and render garbage.
///
/// **BUG THIS CATCHES**: Would catch the zero-total guard being removed or its error
/// being swallowed into `Ok(None)`.
#[tokio::test]
async fn given_empty_languages_when_getting_usage_then_returns_malformed_response() {
    let server = server_with_languages(json!({})).await;

    let err = client_for(&server)
        .get_language_usage(&credentials())
        .await
        .unwrap_err();

    assert!(err.is_malformed_response(), "got {err}");
}

#[tokio::test]
async fn given_null_body_when_getting_usage_then_returns_none() {
    let server = server_with_languages(serde_json::Value::Null).await;

    let usage = client_for(&server)
        .get_language_usage(&credentials())
        .await
        .unwrap();

    assert!(usage.is_none());
}

#[tokio::test]
async fn given_non_numeric_count_when_getting_usage_then_returns_malformed_response() {
    let server = server_with_languages(json!({"Rust": "lots"})).await;

    let err = client_for(&server)
        .get_language_usage(&credentials())
        .await
        .unwrap_err();

    assert!(err.is_malformed_response(), "got {err}");
}
