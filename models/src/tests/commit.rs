// Unit tests for commit references and records

use crate::{CommitRange, CommitRecord, CommitRef, ModelError};

use serde_json::json;

fn record(value: serde_json::Value) -> CommitRecord {
    serde_json::from_value(value).expect("commit record should deserialize from an object")
}

#[test]
fn given_commit_record_with_sha_when_extracting_ref_then_returns_sha() {
    let commit = record(json!({"sha": "abc123", "commit": {"message": "Initial"}}));

    let commit_ref = CommitRef::from_record(&commit).unwrap();

    assert_eq!(commit_ref.sha, "abc123");
}

/// **VALUE**: Verifies a commit without `sha` is an error, not an empty string.
///
/// **WHY THIS MATTERS**: The SHA feeds straight into the compare URL. An empty SHA
/// would produce `/compare/...abc` and a confusing 404 instead of a clear failure.
///
/// **BUG THIS CATCHES**: Would catch a fallback to `unwrap_or_default()`.
#[test]
fn given_commit_record_without_sha_when_extracting_ref_then_returns_missing_field() {
    let commit = record(json!({"commit": {"message": "no sha here"}}));

    let result = CommitRef::from_record(&commit);

    match result {
        Err(ModelError::MissingField { field, .. }) => assert_eq!(field, "sha"),
        other => panic!("Expected MissingField, got {other:?}"),
    }
}

#[test]
fn given_range_when_building_compare_spec_then_uses_three_dots() {
    let range = CommitRange::new(CommitRef::new("first"), CommitRef::new("last"));

    assert_eq!(range.compare_spec(), "first...last");
    assert!(!range.is_single_commit());
}

#[test]
fn given_multiline_message_when_reading_subject_then_returns_first_line() {
    let commit = record(json!({
        "sha": "abc",
        "commit": {
            "message": "Fix pagination\n\nLonger body text",
            "author": {"date": "2024-03-01T10:00:00Z"}
        }
    }));

    assert_eq!(commit.subject(), Some("Fix pagination"));
    assert_eq!(commit.authored_at(), Some("2024-03-01T10:00:00Z"));
}

#[test]
fn given_non_object_element_when_deserializing_record_then_fails() {
    let result = serde_json::from_value::<CommitRecord>(json!("abc123"));

    assert!(result.is_err());
}
