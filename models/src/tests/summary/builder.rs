use crate::summary::builder::NO_DESCRIPTION_PLACEHOLDER;
use crate::{Contributor, ModelError, RepoSummaryBuilder};

fn complete_builder() -> RepoSummaryBuilder {
    RepoSummaryBuilder::default()
        .with_name("cargo")
        .with_description("The Rust package manager")
        .with_commit_count(42)
        .with_branch_count(3)
        .with_contributors(vec![Contributor::new("alice"), Contributor::new("bob")])
}

#[test]
fn given_all_fields_when_building_summary_then_succeeds() {
    let summary = complete_builder().build().unwrap();

    assert_eq!(summary.name, "cargo");
    assert_eq!(summary.commit_count, 42);
    assert_eq!(summary.branch_count, 3);
    assert_eq!(summary.contributor_count(), 2);
    assert_eq!(
        summary.contributor_logins().collect::<Vec<_>>(),
        vec!["alice", "bob"]
    );
    assert!(summary.languages.is_none());
}

/// **VALUE**: Verifies builder validation rejects a missing name.
///
/// **WHY THIS MATTERS**: The aggregate view is headed by the repository name; the
/// original panel rendered nothing at all when the name was missing.
///
/// **BUG THIS CATCHES**: Would catch the required-field check being dropped.
#[test]
fn given_missing_name_when_building_then_returns_validation_error() {
    let builder = RepoSummaryBuilder::default()
        .with_commit_count(1)
        .with_branch_count(1)
        .with_contributors(Vec::new());

    let result = builder.build();

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Repository name is required");
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn given_missing_commit_count_when_building_then_returns_validation_error() {
    let builder = RepoSummaryBuilder::default()
        .with_name("cargo")
        .with_branch_count(1)
        .with_contributors(Vec::new());

    match builder.build() {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Commit count is required");
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn given_no_description_when_building_then_uses_placeholder() {
    let summary = RepoSummaryBuilder::default()
        .with_name("cargo")
        .with_commit_count(1)
        .with_branch_count(1)
        .with_contributors(Vec::new())
        .build()
        .unwrap();

    assert_eq!(summary.description, NO_DESCRIPTION_PLACEHOLDER);
}
