// Unit tests for StatsClientError construction and categorization

use crate::error::stats_client::StatsClientError;

use url::Url;

fn endpoint() -> Url {
    Url::parse("https://api.github.com/repos/octo/hello/branches").unwrap()
}

#[test]
fn given_request_failed_when_formatted_then_includes_status_and_endpoint() {
    let err = StatsClientError::request_failed(404, &endpoint());

    let message = err.to_string();

    assert!(message.contains("404 Not Found"), "message: {message}");
    assert!(message.contains("/repos/octo/hello/branches"));
    assert_eq!(err.status_code(), Some(404));
    assert!(err.is_request_failed());
}

#[test]
fn given_auth_statuses_when_categorized_then_reports_auth_failure() {
    assert_eq!(
        StatsClientError::request_failed(403, &endpoint()).error_category(),
        "auth_failure"
    );
    assert_eq!(
        StatsClientError::request_failed(401, &endpoint()).error_category(),
        "auth_failure"
    );
    assert_eq!(
        StatsClientError::request_failed(404, &endpoint()).error_category(),
        "request_failed"
    );
    assert_eq!(
        StatsClientError::request_failed(503, &endpoint()).error_category(),
        "server_error"
    );
}

#[test]
fn given_malformed_response_when_checked_then_has_no_status() {
    let err = StatsClientError::malformed(&endpoint(), "expected a JSON array");

    assert!(err.is_malformed_response());
    assert_eq!(err.status_code(), None);
    assert!(err.to_string().contains("expected a JSON array"));
}

#[test]
fn given_url_parse_error_when_converted_then_becomes_url_parse_variant() {
    let parse_error = Url::parse("not a url").unwrap_err();

    let err: StatsClientError = parse_error.into();

    assert!(matches!(err, StatsClientError::UrlParse { .. }));
}
