// Unit tests for error module
// Tests message format and conversion from core errors

use crate::error::GitProfileError;

use stats_core::error::StatsClientError;

use url::Url;

/// **VALUE**: Errors serialize with their variant tag.
///
/// **WHY THIS MATTERS**: `--format json` consumers tell failure kinds apart by the tag.
///
/// **BUG THIS CATCHES**: Would catch a dropped `#[derive(Serialize)]` or a changed
/// serde tagging scheme.
#[test]
fn given_not_configured_error_when_serialized_then_contains_variant_and_message() {
    // GIVEN: A NotConfigured error
    let err = GitProfileError::not_configured("No repository given");

    // WHEN: Serializing to JSON
    let json = serde_json::to_string(&err).unwrap();

    // THEN: Tag and message present
    assert!(json.contains("NotConfigured"), "JSON should contain variant name");
    assert!(json.contains("No repository given"));
}

#[test]
fn given_render_error_when_displayed_then_uses_kind_prefix_and_location() {
    let err = GitProfileError::render("disk full");

    let message = err.to_string();

    assert!(message.starts_with("Render Error: disk full"));
    assert!(message.contains("error.rs"), "location should point at the caller");
}

/// **VALUE**: Core client failures convert into `GitProfileError::Core` with their
/// message intact.
///
/// **WHY THIS MATTERS**: The status code in the message is the only hint the user
/// gets about a bad token or a missing repository.
///
/// **BUG THIS CATCHES**: Would catch a conversion that swallows the original message.
#[test]
fn given_request_failed_when_converted_then_core_error_keeps_status() {
    // GIVEN: A 404 from the repository endpoint
    let url = Url::parse("https://api.github.com/repos/octo/missing").unwrap();
    let core = StatsClientError::request_failed(404, &url);

    // WHEN: Converting
    let err = GitProfileError::from(core);

    // THEN: Core variant carrying the status
    assert!(matches!(err, GitProfileError::Core { .. }));
    assert!(err.to_string().contains("404"));
}

#[test]
fn given_model_validation_error_when_converted_then_core_error_keeps_message() {
    let model_error = models::ModelError::validation("Repository name is required");

    let err = GitProfileError::from(model_error);

    assert!(matches!(err, GitProfileError::Core { .. }));
    assert!(err.to_string().contains("Repository name is required"));
}
