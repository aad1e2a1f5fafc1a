use crate::helpers::{absolute_url, client_for, commit, commits, credentials, repo_path};

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NEWEST_SHA: &str = "newest000";
const OLDEST_SHA: &str = "oldest999";

/// Mount a 3-page default commit listing: page 1 starts with NEWEST_SHA and links
/// to page 3, whose last element is OLDEST_SHA.
async fn mount_paginated_listing(server: &MockServer) {
    let next = absolute_url(server, &format!("{}?page=2", repo_path("/commits")));
    let last = absolute_url(server, &format!("{}?page=3", repo_path("/commits")));
    let link = format!(r#"<{next}>; rel="next", <{last}>; rel="last""#);

    let mut last_page = commits("p3", 4);
    last_page.push(commit(OLDEST_SHA));

    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(last_page))
        .with_priority(1)
        .expect(1)
        .mount(server)
        .await;

    let mut first_page = vec![commit(NEWEST_SHA)];
    first_page.extend(commits("p1", 29));

    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(first_page)
                .insert_header("Link", link.as_str()),
        )
        .with_priority(10)
        .mount(server)
        .await;
}

async fn mount_compare(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(repo_path(&format!("/compare/{OLDEST_SHA}...{NEWEST_SHA}"))))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// **VALUE**: Verifies the full commit-count derivation: newest SHA from page 1, oldest
/// SHA from the `rel="last"` page, compare total plus one.
///
/// **WHY THIS MATTERS**: This is the only statistic built from several endpoints. Each
/// step has an off-by-one trap (first vs last element, base commit excluded).
///
/// **BUG THIS CATCHES**: Would catch taking the oldest SHA from page 1, swapping the
/// compare base and head, or dropping the `+ 1`.
#[tokio::test]
async fn given_compare_total_when_counting_commits_then_returns_total_plus_one() {
    // GIVEN: A paginated listing and a compare reporting 41 commits ahead
    let server = MockServer::start().await;
    mount_paginated_listing(&server).await;
    mount_compare(&server, json!({"status": "ahead", "total_commits": 41})).await;

    // WHEN: Counting commits
    let count = client_for(&server)
        .get_commit_count(&credentials())
        .await
        .unwrap();

    // THEN: 41 + base commit
    assert_eq!(count, 42);
}

#[tokio::test]
async fn given_compare_without_total_when_counting_commits_then_returns_zero() {
    let server = MockServer::start().await;
    mount_paginated_listing(&server).await;
    mount_compare(&server, json!({"status": "identical"})).await;

    let count = client_for(&server)
        .get_commit_count(&credentials())
        .await
        .unwrap();

    assert_eq!(count, 0);
}

/// **VALUE**: A compare total at the top of the integer range is a malformed
/// response, not an arithmetic overflow.
///
/// **WHY THIS MATTERS**: The body is untrusted; a proxy or a broken Enterprise host can
/// send any number, and a panic would take the whole load down with it.
///
/// **BUG THIS CATCHES**: Would catch the base-commit `+ 1` being done unchecked.
#[tokio::test]
async fn given_compare_total_at_integer_limit_when_counting_then_returns_malformed_response() {
    // GIVEN: A compare claiming u64::MAX commits ahead
    let server = MockServer::start().await;
    mount_paginated_listing(&server).await;
    mount_compare(&server, json!({"total_commits": u64::MAX})).await;

    // WHEN: Counting commits
    let err = client_for(&server)
        .get_commit_count(&credentials())
        .await
        .unwrap_err();

    // THEN: Typed failure naming the field
    assert!(err.is_malformed_response(), "got {err}");
    assert!(err.to_string().contains("total_commits"));
}

#[tokio::test]
async fn given_paginated_listing_when_getting_range_then_spans_oldest_to_newest() {
    let server = MockServer::start().await;
    mount_paginated_listing(&server).await;

    let range = client_for(&server)
        .get_commit_range(&credentials())
        .await
        .unwrap();

    assert_eq!(range.from.sha, OLDEST_SHA);
    assert_eq!(range.to.sha, NEWEST_SHA);
}

/// **VALUE**: Verifies a single-page listing (no Link header) takes both ends from page 1.
///
/// **WHY THIS MATTERS**: Most small repositories fit in one page and GitHub sends no
/// Link header at all.
///
/// **BUG THIS CATCHES**: Would catch treating a missing Link header as an error.
#[tokio::test]
async fn given_single_page_listing_when_counting_commits_then_uses_last_element_as_oldest() {
    // GIVEN: One page, newest first, no Link header
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            commit(NEWEST_SHA),
            commit("middle"),
            commit(OLDEST_SHA)
        ])))
        .expect(2)
        .mount(&server)
        .await;
    mount_compare(&server, json!({"total_commits": 2})).await;

    // WHEN: Counting
    let count = client_for(&server)
        .get_commit_count(&credentials())
        .await
        .unwrap();

    // THEN: 2 ahead + base
    assert_eq!(count, 3);
}

#[tokio::test]
async fn given_empty_listing_when_counting_commits_then_returns_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_commit_count(&credentials())
        .await
        .unwrap_err();

    assert!(err.is_malformed_response(), "got {err}");
}

#[tokio::test]
async fn given_commit_without_sha_when_counting_then_returns_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"commit": {"message": "x"}}])),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_commit_count(&credentials())
        .await
        .unwrap_err();

    assert!(err.is_malformed_response(), "got {err}");
}

/// **VALUE**: Verifies a `rel="last"` link to another host is refused.
///
/// **WHY THIS MATTERS**: Following it would send the token to whatever host the
/// header names.
///
/// **BUG THIS CATCHES**: Would catch the origin check being removed from the
/// last-page primitive.
#[tokio::test]
async fn given_last_link_to_foreign_host_when_counting_then_refuses_to_follow() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([commit(NEWEST_SHA)]))
                .insert_header(
                    "Link",
                    r#"<https://attacker.example.com/commits?page=9>; rel="last""#,
                ),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_commit_count(&credentials())
        .await
        .unwrap_err();

    assert!(err.is_malformed_response(), "got {err}");
}

#[tokio::test]
async fn given_relative_last_link_when_counting_then_returns_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([commit(NEWEST_SHA)]))
                .insert_header("Link", r#"</commits?page=4>; rel="last""#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_commit_count(&credentials())
        .await
        .unwrap_err();

    assert!(err.is_malformed_response(), "got {err}");
    assert!(err.to_string().contains("/commits?page=4"));
}
