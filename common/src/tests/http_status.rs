// Unit tests for HttpStatusCode classification

use crate::HttpStatusCode;

#[test]
fn given_github_failure_codes_when_classified_then_match_expected_families() {
    assert!(HttpStatusCode(404).is_client_error());
    assert!(!HttpStatusCode(404).is_auth_failure());
    assert!(HttpStatusCode(403).is_auth_failure());
    assert!(HttpStatusCode(401).is_auth_failure());
    assert!(HttpStatusCode(502).is_server_error());
    assert!(HttpStatusCode(204).is_success());
    assert!(!HttpStatusCode(301).is_success());
}

/// **VALUE**: Verifies status display includes both number and reason.
///
/// **WHY THIS MATTERS**: `RequestFailed` messages are shown verbatim to the user.
/// "HTTP 403 Forbidden" tells them to check their token; a bare "403" often doesn't.
///
/// **BUG THIS CATCHES**: Would catch if Display regresses to the numeric code only.
#[test]
fn given_status_when_displayed_then_includes_reason_phrase() {
    assert_eq!(HttpStatusCode(403).to_string(), "403 Forbidden");
    assert_eq!(HttpStatusCode(404).to_string(), "404 Not Found");
    assert_eq!(HttpStatusCode(418).to_string(), "418 Unexpected Status");
}
