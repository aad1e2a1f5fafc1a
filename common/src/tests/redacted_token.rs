// Unit tests for RedactedToken secrecy guarantees

use crate::RedactedToken;

const SECRET: &str = "ghp_exampleSecretValue1234567890";

/// **VALUE**: Verifies the token value never leaks through Debug or Display.
///
/// **WHY THIS MATTERS**: Credentials are logged with `{:?}` and errors are formatted
/// with `{}` all over the workspace. A token in a log file is a leaked token.
///
/// **BUG THIS CATCHES**: Would catch if someone derives `Debug` instead of using the
/// manual redacting impl.
#[test]
fn given_token_when_formatted_then_value_is_redacted() {
    // GIVEN: A token holding a secret
    let token = RedactedToken::new(SECRET);

    // WHEN: Formatting with Debug and Display
    let debug = format!("{token:?}");
    let display = format!("{token}");

    // THEN: Neither output contains the secret
    assert!(!debug.contains(SECRET), "Debug leaked the token");
    assert!(!display.contains(SECRET), "Display leaked the token");
    assert!(debug.contains("REDACTED"));
}

/// **VALUE**: Verifies serialization is refused.
///
/// **WHY THIS MATTERS**: Credentials are carried next to serializable summaries; an
/// accidental `serde_json::to_string` must fail instead of writing the secret out.
///
/// **BUG THIS CATCHES**: Would catch if `Serialize` is derived.
#[test]
fn given_token_when_serialized_then_returns_error() {
    // GIVEN: A token
    let token = RedactedToken::new(SECRET);

    // WHEN: Serializing
    let result = serde_json::to_string(&token);

    // THEN: Fails without the secret in the message
    let err = result.expect_err("serialization must fail");
    assert!(!err.to_string().contains(SECRET));
}

#[test]
fn given_token_when_building_authorization_header_then_uses_token_scheme() {
    let token = RedactedToken::new("abc123");

    assert_eq!(token.authorization_header(), "token abc123");
    assert_eq!(token.len(), 6);
    assert!(!token.is_empty());
}

#[test]
fn given_blank_token_when_checked_then_reports_empty() {
    assert!(RedactedToken::new("").is_empty());
    assert!(RedactedToken::new("   ").is_empty());
    assert!(RedactedToken::default().is_empty());
}
