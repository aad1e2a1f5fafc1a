use crate::helpers::{
    branches, client_for, credentials, expected_authorization, repo_path, absolute_url,
};

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Repository metadata, branches and contributors
// ============================================================================

/// **VALUE**: Verifies the name is projected from the repository object and the
/// request is signed with `Authorization: token <token>`.
///
/// **WHY THIS MATTERS**: Unsigned requests get 60/hour and no private repositories.
///
/// **BUG THIS CATCHES**: Would catch a switch to `Bearer`, a dropped header, or the
/// wrong field being read.
#[tokio::test]
async fn given_repository_when_getting_name_then_returns_name_field() {
    // GIVEN: A repository endpoint that requires the token header
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("")))
        .and(header("authorization", expected_authorization().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "hello",
            "description": "My first repository",
            "full_name": "octo/hello"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Fetching the name
    let name = client_for(&server).get_repo_name(&credentials()).await.unwrap();

    // THEN: Name projected
    assert_eq!(name.as_deref(), Some("hello"));
}

#[tokio::test]
async fn given_repository_when_getting_description_then_returns_description_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "hello",
            "description": "My first repository"
        })))
        .mount(&server)
        .await;

    let description = client_for(&server)
        .get_repo_description(&credentials())
        .await
        .unwrap();

    assert_eq!(description.as_deref(), Some("My first repository"));
}

/// **VALUE**: Verifies absent and null fields are soft `None`, not failures.
///
/// **WHY THIS MATTERS**: Most repositories have `"description": null`. The loader
/// swaps in a placeholder for `None`; an error here would abort nothing but still
/// log a spurious failure.
///
/// **BUG THIS CATCHES**: Would catch `as_str().ok_or(..)` style strictness on optional fields.
#[tokio::test]
async fn given_null_description_and_missing_name_when_fetching_then_returns_none() {
    // GIVEN: A repository object with null description and no name
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"description": null, "id": 1})),
        )
        .mount(&server)
        .await;
    let client = client_for(&server);

    // WHEN: Fetching both fields
    let name = client.get_repo_name(&credentials()).await.unwrap();
    let description = client.get_repo_description(&credentials()).await.unwrap();

    // THEN: Both None
    assert_eq!(name, None);
    assert_eq!(description, None);
}

#[tokio::test]
async fn given_non_string_name_when_fetching_then_returns_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": 42})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_repo_name(&credentials())
        .await
        .unwrap_err();

    assert!(err.is_malformed_response(), "got {err}");
}

/// **VALUE**: Pins the first-page-only branch count even when GitHub advertises more pages.
///
/// **WHY THIS MATTERS**: The count is documented as "first page only". Quietly following
/// `rel="next"` would change reported numbers and multiply request cost for large repos.
///
/// **BUG THIS CATCHES**: Would catch someone "fixing" the limitation with full pagination:
/// the page-2 mock expects zero calls and fails verification on drop.
#[tokio::test]
async fn given_multiple_branch_pages_when_counting_then_only_first_page_counted() {
    // GIVEN: 30 branches on page 1 and a Link to page 2
    let server = MockServer::start().await;
    let next = absolute_url(&server, &format!("{}?page=2", repo_path("/branches")));
    let last = absolute_url(&server, &format!("{}?page=4", repo_path("/branches")));
    let link = format!(r#"<{next}>; rel="next", <{last}>; rel="last""#);

    Mock::given(method("GET"))
        .and(path(repo_path("/branches")))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(branches(30)))
        .with_priority(1)
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(repo_path("/branches")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(branches(30))
                .insert_header("Link", link.as_str()),
        )
        .with_priority(10)
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Counting branches
    let count = client_for(&server)
        .get_branch_count(&credentials())
        .await
        .unwrap();

    // THEN: First page length only
    assert_eq!(count, 30);
}

/// **VALUE**: Pins first-page-only contributors and verifies passthrough fields survive.
///
/// **WHY THIS MATTERS**: The drill-down list is built from this page; callers also read
/// fields the core never names (avatar, contribution count).
///
/// **BUG THIS CATCHES**: Would catch full pagination sneaking in, or a narrowed type
/// dropping unknown fields.
#[tokio::test]
async fn given_contributor_pages_when_listing_then_returns_first_page_with_fields() {
    // GIVEN: Two contributors and a Link to a page that must not be requested
    let server = MockServer::start().await;
    let next = absolute_url(&server, &format!("{}?page=2", repo_path("/contributors")));

    Mock::given(method("GET"))
        .and(path(repo_path("/contributors")))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"login": "carol"}])))
        .with_priority(1)
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(repo_path("/contributors")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([
                    {"login": "alice", "contributions": 120, "avatar_url": "https://a"},
                    {"login": "bob", "contributions": 7, "type": "User"}
                ]))
                .insert_header("Link", format!(r#"<{next}>; rel="next""#).as_str()),
        )
        .with_priority(10)
        .mount(&server)
        .await;

    // WHEN: Listing contributors
    let contributors = client_for(&server)
        .get_contributors(&credentials())
        .await
        .unwrap();

    // THEN: Exactly the first page, extra fields preserved
    let logins: Vec<&str> = contributors.iter().map(|c| c.login.as_str()).collect();
    assert_eq!(logins, vec!["alice", "bob"]);
    assert_eq!(contributors[0].contributions(), Some(120));
    assert_eq!(
        contributors[0].fields.get("avatar_url"),
        Some(&json!("https://a"))
    );
    assert_eq!(contributors[1].fields.get("type"), Some(&json!("User")));
}

#[tokio::test]
async fn given_contributor_without_login_when_listing_then_returns_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("/contributors")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"type": "Anonymous", "contributions": 3}])),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_contributors(&credentials())
        .await
        .unwrap_err();

    assert!(err.is_malformed_response(), "got {err}");
}
