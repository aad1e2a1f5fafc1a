//! Pure renderers, one per view state.
//!
//! Every piece of text that came from GitHub or the command line is
//! HTML-escaped before it lands in markup.

use crate::cli::OutputFormat;
use crate::error::GitProfileError;
use crate::state::{ViewModel, ViewState};

use models::{CommitRecord, LanguageUsage, RepoSummary};

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::Serialize;

pub const LANGUAGE_CHART_TITLE: &str = "Language Usage";

const CHART_WIDTH: u32 = 480;
const CHART_HEIGHT: u32 = 320;
const PIE_CENTER_X: f64 = 150.0;
const PIE_CENTER_Y: f64 = 170.0;
const PIE_RADIUS: f64 = 120.0;
const LEGEND_X: u32 = 300;
const LEGEND_ROW_HEIGHT: u32 = 22;
const SHORT_SHA_LEN: usize = 7;

// Languages with a fixed color; the rest cycle through the palette
const KNOWN_LANGUAGE_COLORS: [(&str, &str); 3] = [
    ("Java", "#1f4fd6"),
    ("Kotlin", "#c026d3"),
    ("Python", "#16a34a"),
];

const PALETTE: [&str; 8] = [
    "#f59e0b", "#ef4444", "#06b6d4", "#8b5cf6", "#84cc16", "#ec4899", "#64748b", "#14b8a6",
];

/// Render the current view as a complete HTML document.
pub fn render_html(model: &ViewModel) -> String {
    let (title, body) = if let Some(message) = &model.error {
        ("Error".to_string(), render_error(message))
    } else if model.loading {
        ("Loading".to_string(), "<p>Loading...</p>\n".to_string())
    } else {
        match &model.view {
            ViewState::Aggregate => match &model.summary {
                Some(summary) => (summary.name.clone(), render_aggregate(summary)),
                None => (
                    "git-profile".to_string(),
                    "<p>No repository loaded</p>\n".to_string(),
                ),
            },
            ViewState::ContributorDetail(login) => (
                format!("Statistics for {login}"),
                render_contributor_detail(login, &model.contributor_commits),
            ),
        }
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(&title),
        body
    )
}

/// Summary heading, the two-column statistics table, contributors and the
/// language chart.
pub fn render_aggregate(summary: &RepoSummary) -> String {
    let mut html = String::new();

    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&summary.name)));
    html.push_str(&format!("<p>{}</p>\n", escape_html(&summary.description)));

    html.push_str("<table>\n");
    for (label, value) in [
        ("Total Commits:", summary.commit_count.to_string()),
        ("Number of Branches:", summary.branch_count.to_string()),
        (
            "Number of Contributors:",
            summary.contributor_count().to_string(),
        ),
    ] {
        html.push_str(&format!("<tr><td>{label}</td><td>{value}</td></tr>\n"));
    }
    html.push_str("</table>\n");

    html.push_str("<h2>Contributors</h2>\n<ul>\n");
    for contributor in &summary.contributors {
        let login = escape_html(&contributor.login);
        let name = match contributor.html_url() {
            Some(url) => format!("<a href=\"{}\">{login}</a>", escape_html(url)),
            None => login,
        };
        match contributor.contributions() {
            Some(count) => html.push_str(&format!("<li>{name} ({count} contributions)</li>\n")),
            None => html.push_str(&format!("<li>{name}</li>\n")),
        }
    }
    html.push_str("</ul>\n");

    html.push_str(&render_language_chart(summary.languages.as_ref()));
    html
}

/// Drill-down for one contributor: total and one line per commit.
pub fn render_contributor_detail(login: &str, commits: &[CommitRecord]) -> String {
    let mut html = String::new();

    html.push_str(&format!("<h1>Statistics for {}</h1>\n", escape_html(login)));
    html.push_str(&format!("<p>Total Commits: {}</p>\n", commits.len()));

    html.push_str("<ul>\n");
    for commit in commits {
        let sha = escape_html(commit.sha().map(short_sha).unwrap_or("unknown"));
        let subject = escape_html(commit.subject().unwrap_or_default());
        match commit.authored_at() {
            Some(date) => html.push_str(&format!(
                "<li><code>{sha}</code> {subject} <time>{}</time></li>\n",
                escape_html(date)
            )),
            None => html.push_str(&format!("<li><code>{sha}</code> {subject}</li>\n")),
        }
    }
    html.push_str("</ul>\n");
    html
}

pub fn render_error(message: &str) -> String {
    format!("<h1>Error</h1>\n<p>{}</p>\n", escape_html(message))
}

/// SVG pie chart of the language shares, largest first, with a legend.
pub fn render_language_chart(languages: Option<&LanguageUsage>) -> String {
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CHART_WIDTH}\" height=\"{CHART_HEIGHT}\" role=\"img\">\n\
         <text x=\"{}\" y=\"24\" text-anchor=\"middle\" font-size=\"18\">{LANGUAGE_CHART_TITLE}</text>\n",
        CHART_WIDTH / 2
    );

    let ranked = languages.map(LanguageUsage::ranked).unwrap_or_default();
    if ranked.is_empty() {
        svg.push_str(&format!(
            "<text x=\"{PIE_CENTER_X}\" y=\"{PIE_CENTER_Y}\" text-anchor=\"middle\">No language data</text>\n"
        ));
        svg.push_str("</svg>\n");
        return svg;
    }

    let mut palette = PALETTE.iter().cycle();
    let mut start_angle = -FRAC_PI_2;

    for (row, (language, percentage)) in ranked.iter().enumerate() {
        let color = language_color(language)
            .unwrap_or_else(|| palette.next().copied().unwrap_or(PALETTE[0]));
        let share = percentage / 100.0;

        if share >= 1.0 {
            svg.push_str(&format!(
                "<circle cx=\"{PIE_CENTER_X}\" cy=\"{PIE_CENTER_Y}\" r=\"{PIE_RADIUS}\" fill=\"{color}\"/>\n"
            ));
        } else if share > 0.0 {
            let end_angle = start_angle + share * TAU;
            svg.push_str(&format!(
                "<path d=\"{}\" fill=\"{color}\"/>\n",
                slice_path(start_angle, end_angle)
            ));
            start_angle = end_angle;
        }

        let legend_y = 60 + row as u32 * LEGEND_ROW_HEIGHT;
        svg.push_str(&format!(
            "<rect x=\"{LEGEND_X}\" y=\"{}\" width=\"12\" height=\"12\" fill=\"{color}\"/>\n",
            legend_y - 11
        ));
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{legend_y}\">{} ({percentage:.1}%)</text>\n",
            LEGEND_X + 18,
            escape_html(language)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// JSON for the current view, for scripting.
pub fn render_json(model: &ViewModel) -> Result<String, GitProfileError> {
    #[derive(Serialize)]
    struct ContributorDetailJson<'a> {
        login: &'a str,
        total_commits: usize,
        commits: &'a [CommitRecord],
    }

    let json = if let Some(message) = &model.error {
        serde_json::to_string_pretty(&serde_json::json!({ "error": message }))
    } else {
        match &model.view {
            ViewState::Aggregate => serde_json::to_string_pretty(&model.summary),
            ViewState::ContributorDetail(login) => {
                serde_json::to_string_pretty(&ContributorDetailJson {
                    login,
                    total_commits: model.contributor_commits.len(),
                    commits: &model.contributor_commits,
                })
            }
        }
    };

    json.map_err(|e| GitProfileError::render(format!("Failed to serialize view: {e}")))
}

pub fn render(model: &ViewModel, format: OutputFormat) -> Result<String, GitProfileError> {
    match format {
        OutputFormat::Html => Ok(render_html(model)),
        OutputFormat::Json => render_json(model),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn short_sha(sha: &str) -> &str {
    match sha.char_indices().nth(SHORT_SHA_LEN) {
        Some((end, _)) => &sha[..end],
        None => sha,
    }
}

fn language_color(language: &str) -> Option<&'static str> {
    KNOWN_LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
}

fn slice_path(start_angle: f64, end_angle: f64) -> String {
    let (x0, y0) = point_on_circle(start_angle);
    let (x1, y1) = point_on_circle(end_angle);
    let large_arc = u8::from(end_angle - start_angle > std::f64::consts::PI);

    format!(
        "M {PIE_CENTER_X:.2} {PIE_CENTER_Y:.2} L {x0:.2} {y0:.2} A {PIE_RADIUS:.2} {PIE_RADIUS:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z"
    )
}

fn point_on_circle(angle: f64) -> (f64, f64) {
    (
        PIE_CENTER_X + PIE_RADIUS * angle.cos(),
        PIE_CENTER_Y + PIE_RADIUS * angle.sin(),
    )
}
