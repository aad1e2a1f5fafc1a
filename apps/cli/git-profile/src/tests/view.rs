// Unit tests for the renderers

use crate::cli::OutputFormat;
use crate::state::{ViewModel, ViewState};
use crate::view::{
    LANGUAGE_CHART_TITLE, escape_html, render, render_aggregate, render_contributor_detail,
    render_html, render_json, render_language_chart,
};

use models::{CommitRecord, Contributor, LanguageUsage, RepoSummary, RepoSummaryBuilder};

use std::collections::BTreeMap;

use serde_json::{Value, json};

fn languages(counts: &[(&str, u64)]) -> LanguageUsage {
    let counts: BTreeMap<String, u64> = counts
        .iter()
        .map(|(name, bytes)| (name.to_string(), *bytes))
        .collect();
    LanguageUsage::from_byte_counts(&counts).unwrap()
}

fn contributor(login: &str, contributions: u64) -> Contributor {
    serde_json::from_value(json!({"login": login, "contributions": contributions})).unwrap()
}

fn summary() -> RepoSummary {
    RepoSummaryBuilder::default()
        .with_name("hello")
        .with_description("My <first> repository")
        .with_commit_count(42)
        .with_branch_count(3)
        .with_contributors(vec![contributor("alice", 30), contributor("bob", 12)])
        .with_languages(Some(languages(&[("Rust", 600), ("Python", 200), ("Shell", 200)])))
        .build()
        .unwrap()
}

fn record(sha: &str, message: &str) -> CommitRecord {
    serde_json::from_value(json!({"sha": sha, "commit": {"message": message}})).unwrap()
}

#[test]
fn given_markup_characters_when_escaped_then_entities_used() {
    assert_eq!(
        escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
    );
    assert_eq!(escape_html("plain"), "plain");
}

/// **VALUE**: The aggregate view shows heading, description and the three counts in
/// a two-column table.
///
/// **WHY THIS MATTERS**: This is the whole point of the tool; the labels are what
/// users scan for.
///
/// **BUG THIS CATCHES**: Would catch swapped counts or the contributor count being
/// taken from anything other than the contributor list.
#[test]
fn given_summary_when_rendering_aggregate_then_table_holds_counts() {
    // GIVEN: A summary with 42 commits, 3 branches, 2 contributors
    let summary = summary();

    // WHEN: Rendering
    let html = render_aggregate(&summary);

    // THEN: Heading, escaped description and the table rows
    assert!(html.contains("<h1>hello</h1>"));
    assert!(html.contains("<p>My &lt;first&gt; repository</p>"));
    assert!(html.contains("<tr><td>Total Commits:</td><td>42</td></tr>"));
    assert!(html.contains("<tr><td>Number of Branches:</td><td>3</td></tr>"));
    assert!(html.contains("<tr><td>Number of Contributors:</td><td>2</td></tr>"));
    assert!(html.contains("<li>alice (30 contributions)</li>"));
    assert!(html.contains(LANGUAGE_CHART_TITLE));
}

/// **VALUE**: User-controlled text never reaches the markup unescaped.
///
/// **WHY THIS MATTERS**: Descriptions and logins come from GitHub and anyone can put
/// `<script>` in a repository description.
///
/// **BUG THIS CATCHES**: Would catch a renderer interpolating raw strings.
#[test]
fn given_script_in_description_when_rendering_then_escaped() {
    let mut summary = summary();
    summary.description = "<script>alert(1)</script>".to_string();
    summary.contributors = vec![Contributor::new("<b>mallory</b>")];

    let html = render_aggregate(&summary);

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("<li>&lt;b&gt;mallory&lt;/b&gt;</li>"));
}

#[test]
fn given_three_languages_when_rendering_chart_then_slices_and_legend_ranked() {
    let usage = languages(&[("Rust", 600), ("Python", 200), ("Shell", 200)]);

    let svg = render_language_chart(Some(&usage));

    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<path ").count(), 3);
    assert!(svg.contains("Rust (60.0%)"));
    assert!(svg.contains("Python (20.0%)"));
    // Largest share is listed first
    let rust = svg.find("Rust (").unwrap();
    let python = svg.find("Python (").unwrap();
    assert!(rust < python);
}

#[test]
fn given_single_language_when_rendering_chart_then_full_circle() {
    let usage = languages(&[("Rust", 1024)]);

    let svg = render_language_chart(Some(&usage));

    assert!(svg.contains("<circle "));
    assert!(!svg.contains("<path "));
    assert!(svg.contains("Rust (100.0%)"));
}

#[test]
fn given_no_languages_when_rendering_chart_then_placeholder_text() {
    let svg = render_language_chart(None);

    assert!(svg.contains(LANGUAGE_CHART_TITLE));
    assert!(svg.contains("No language data"));
}

#[test]
fn given_commits_when_rendering_contributor_detail_then_short_sha_and_subject() {
    let commits = vec![
        record("0123456789abcdef", "Fix parser\n\nLonger body"),
        record("fedcba9876543210", "Add <tests>"),
    ];

    let html = render_contributor_detail("alice", &commits);

    assert!(html.contains("<h1>Statistics for alice</h1>"));
    assert!(html.contains("<p>Total Commits: 2</p>"));
    assert!(html.contains("<li><code>0123456</code> Fix parser</li>"));
    assert!(html.contains("<li><code>fedcba9</code> Add &lt;tests&gt;</li>"));
    assert!(!html.contains("Longer body"));
}

#[test]
fn given_error_in_model_when_rendering_html_then_error_page_wins() {
    let model = ViewModel {
        summary: Some(summary()),
        error: Some("Request Failed Error: HTTP 404".to_string()),
        ..ViewModel::default()
    };

    let html = render_html(&model);

    assert!(html.contains("<title>Error</title>"));
    assert!(html.contains("HTTP 404"));
    assert!(!html.contains("Total Commits:"));
}

#[test]
fn given_detail_view_when_rendering_html_then_document_titled_for_login() {
    let model = ViewModel {
        view: ViewState::ContributorDetail("alice".to_string()),
        contributor_commits: vec![record("abc", "One")],
        ..ViewModel::default()
    };

    let html = render_html(&model);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Statistics for alice</title>"));
}

#[test]
fn given_aggregate_model_when_rendering_json_then_summary_fields_present() {
    let model = ViewModel {
        summary: Some(summary()),
        ..ViewModel::default()
    };

    let json: Value = serde_json::from_str(&render_json(&model).unwrap()).unwrap();

    assert_eq!(json["name"], "hello");
    assert_eq!(json["commit_count"], 42);
    assert_eq!(json["branch_count"], 3);
    assert_eq!(json["contributors"][0]["login"], "alice");
}

#[test]
fn given_detail_model_when_rendering_json_then_commits_listed() {
    let model = ViewModel {
        view: ViewState::ContributorDetail("alice".to_string()),
        contributor_commits: vec![record("abc", "One"), record("def", "Two")],
        ..ViewModel::default()
    };

    let rendered = render(&model, OutputFormat::Json).unwrap();
    let json: Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(json["login"], "alice");
    assert_eq!(json["total_commits"], 2);
    assert_eq!(json["commits"][1]["sha"], "def");
}

#[test]
fn given_contributor_with_profile_url_when_rendering_then_login_links_to_profile() {
    let mut summary = summary();
    summary.contributors = vec![
        serde_json::from_value(json!({
            "login": "alice",
            "contributions": 30,
            "html_url": "https://github.com/alice?tab=\"x\""
        }))
        .unwrap(),
    ];

    let html = render_aggregate(&summary);

    assert!(html.contains(
        "<li><a href=\"https://github.com/alice?tab=&quot;x&quot;\">alice</a> (30 contributions)</li>"
    ));
}

#[test]
fn given_commit_with_author_date_when_rendering_detail_then_date_shown() {
    let commit: CommitRecord = serde_json::from_value(json!({
        "sha": "0123456789abcdef",
        "commit": {"message": "Fix parser", "author": {"date": "2024-03-01T10:00:00Z"}}
    }))
    .unwrap();

    let html = render_contributor_detail("alice", &[commit]);

    assert!(html.contains(
        "<li><code>0123456</code> Fix parser <time>2024-03-01T10:00:00Z</time></li>"
    ));
}
