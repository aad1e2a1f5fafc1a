use crate::helpers::{client_for, commit, commits, credentials, repo_path};

use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HEAD_SHA: &str = "head123";
const CONTRIBUTOR: &str = "alice";

/// Mount the default listing (for the traversal root) and one mock per author page.
/// `pages` are served as page 1, 2, ...; every later page is empty.
async fn server_with_author_pages(pages: Vec<Vec<Value>>) -> MockServer {
    let server = MockServer::start().await;

    for (index, body) in pages.into_iter().enumerate() {
        Mock::given(method("GET"))
            .and(path(repo_path("/commits")))
            .and(query_param("author", CONTRIBUTOR))
            .and(query_param("sha", HEAD_SHA))
            .and(query_param("per_page", "100"))
            .and(query_param("page", (index + 1).to_string().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .with_priority(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .and(query_param("author", CONTRIBUTOR))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<Value>::new()))
        .with_priority(5)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![commit(HEAD_SHA)]))
        .with_priority(10)
        .mount(&server)
        .await;

    server
}

/// Number of author-filtered page requests the server saw.
async fn author_page_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .filter(|request| request.url.query_pairs().any(|(key, _)| key == "author"))
        .count()
}

fn shas(records: &[models::CommitRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.sha().unwrap_or_default().to_string())
        .collect()
}

/// **VALUE**: Verifies an exact multiple of 100 drains every page and stops on the
/// empty one: 2 full pages -> 3 requests.
///
/// **WHY THIS MATTERS**: The drill-down count must be the full history, and the loop
/// has no other stop condition.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one page counter (starting at 0), a
/// loop that never terminates, or pages concatenated out of order.
#[tokio::test]
async fn given_full_pages_when_draining_then_requests_until_empty_page() {
    // GIVEN: 200 commits in 2 full pages
    let page_one = commits("a", 100);
    let page_two = commits("b", 100);
    let mut expected = shas_of(&page_one);
    expected.extend(shas_of(&page_two));
    let server = server_with_author_pages(vec![page_one, page_two]).await;

    // WHEN: Fetching all commits by the contributor
    let records = client_for(&server)
        .get_all_commits_by_contributor(&credentials(), CONTRIBUTOR)
        .await
        .unwrap();

    // THEN: Concatenation in request order, P + 1 requests
    assert_eq!(shas(&records), expected);
    assert_eq!(author_page_requests(&server).await, 3);
}

/// **VALUE**: Verifies a short page does not end the drain; only an empty page does.
///
/// **WHY THIS MATTERS**: Author filtering can return fewer than 100 commits on a page
/// that is not the last. Stopping early under-reports the contributor's history.
///
/// **BUG THIS CATCHES**: Would catch the common `len < per_page` shortcut.
#[tokio::test]
async fn given_short_page_before_more_results_when_draining_then_keeps_going() {
    // GIVEN: A short page followed by another non-empty page
    let server =
        server_with_author_pages(vec![commits("a", 100), commits("b", 40), commits("c", 10)])
            .await;

    // WHEN: Draining
    let records = client_for(&server)
        .get_all_commits_by_contributor(&credentials(), CONTRIBUTOR)
        .await
        .unwrap();

    // THEN: Everything collected; 3 data pages + the empty terminator
    assert_eq!(records.len(), 150);
    assert_eq!(records.last().and_then(|r| r.sha()), Some("c-9"));
    assert_eq!(author_page_requests(&server).await, 4);
}

#[tokio::test]
async fn given_contributor_without_commits_when_draining_then_returns_empty_after_one_request() {
    let server = server_with_author_pages(Vec::new()).await;

    let records = client_for(&server)
        .get_all_commits_by_contributor(&credentials(), CONTRIBUTOR)
        .await
        .unwrap();

    assert!(records.is_empty());
    assert_eq!(author_page_requests(&server).await, 1);
}

#[tokio::test]
async fn given_failing_page_when_draining_then_returns_error_not_partial_result() {
    // GIVEN: Page 1 succeeds, page 2 fails
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .and(query_param("author", CONTRIBUTOR))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .and(query_param("author", CONTRIBUTOR))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(commits("a", 100)))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(repo_path("/commits")))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![commit(HEAD_SHA)]))
        .with_priority(10)
        .mount(&server)
        .await;

    // WHEN: Draining
    let err = client_for(&server)
        .get_all_commits_by_contributor(&credentials(), CONTRIBUTOR)
        .await
        .unwrap_err();

    // THEN: The failure, carrying the status
    assert_eq!(err.status_code(), Some(502));
}

fn shas_of(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .map(|v| v["sha"].as_str().unwrap_or_default().to_string())
        .collect()
}
