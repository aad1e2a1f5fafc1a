pub mod pagination;

use crate::config::ApiConfig;
use crate::error::stats_client::StatsClientError;

use pagination::{LinkRelations, Page};

use models::{CommitRange, CommitRecord, CommitRef, Contributor, Credentials, LanguageUsage};

use std::collections::BTreeMap;

use log::{debug, info, warn};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

const GITHUB_JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const REPOS_SEGMENT: &str = "repos";
const BRANCHES_ENDPOINT: &str = "branches";
const CONTRIBUTORS_ENDPOINT: &str = "contributors";
const LANGUAGES_ENDPOINT: &str = "languages";
const COMMITS_ENDPOINT: &str = "commits";
const COMPARE_ENDPOINT: &str = "compare";
const TOTAL_COMMITS_FIELD: &str = "total_commits";
const CONTRIBUTOR_COMMITS_PER_PAGE: &str = "100";

/// GitHub repository statistics client.
///
/// Each public operation is a fixed, strictly sequential series of GET
/// requests. Nothing is cached and nothing is retried: a non-2xx status
/// surfaces immediately as [`StatsClientError::RequestFailed`].
///
/// Timeouts come from the underlying `reqwest::Client`, configured through
/// [`ApiConfig::timeout_secs`].
#[derive(Clone)]
pub struct RepoStatsClient {
    base_url: Url,
    client: Client,
}

impl RepoStatsClient {
    /// Client for `https://api.github.com` with default timeout and user agent.
    pub fn new() -> Result<Self, StatsClientError> {
        Self::from_config(&ApiConfig::default())
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, StatsClientError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(StatsClientError::malformed(
                &base_url,
                "API base URL cannot carry a path",
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        debug!(
            "Stats client ready: base_url={}, timeout={}s",
            base_url, config.timeout_secs
        );

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ============================================
    // REPOSITORY METADATA
    // ============================================

    /// `name` of `/repos/{owner}/{repo}`; `None` when absent or null.
    pub async fn get_repo_name(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<String>, StatsClientError> {
        self.repo_string_field(credentials, "name").await
    }

    /// `description` of `/repos/{owner}/{repo}`; `None` when absent or null.
    pub async fn get_repo_description(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<String>, StatsClientError> {
        self.repo_string_field(credentials, "description").await
    }

    /// Number of branches on the **first page** of `/branches`.
    ///
    /// Further pages are deliberately not followed, so repositories with more
    /// branches than GitHub's default page size report that page size.
    pub async fn get_branch_count(
        &self,
        credentials: &Credentials,
    ) -> Result<usize, StatsClientError> {
        let url = self.repo_url(credentials, &[BRANCHES_ENDPOINT])?;
        let page: Page<Value> = self.fetch_array(&url, credentials).await?;

        if page.links.has_more() {
            debug!(
                "{}: branch count limited to first page ({})",
                credentials.full_name(),
                page.len()
            );
        }

        Ok(page.len())
    }

    /// Contributors on the **first page** of `/contributors`, fields passed through.
    pub async fn get_contributors(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<Contributor>, StatsClientError> {
        let url = self.repo_url(credentials, &[CONTRIBUTORS_ENDPOINT])?;
        let page: Page<Contributor> = self.fetch_array(&url, credentials).await?;

        if page.links.has_more() {
            debug!(
                "{}: contributor list limited to first page ({})",
                credentials.full_name(),
                page.len()
            );
        }

        Ok(page.items)
    }

    /// Percentage of bytes per language from `/languages`.
    ///
    /// # Errors
    ///
    /// [`StatsClientError::MalformedResponse`] when the object is empty or all
    /// counts are zero, since the percentages would be undefined.
    pub async fn get_language_usage(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<LanguageUsage>, StatsClientError> {
        let url = self.repo_url(credentials, &[LANGUAGES_ENDPOINT])?;
        let (body, _) = self.fetch_json(&url, credentials).await?;

        if body.is_null() {
            return Ok(None);
        }

        let byte_counts: BTreeMap<String, u64> = serde_json::from_value(body).map_err(|e| {
            StatsClientError::malformed(&url, format!("expected language byte counts: {e}"))
        })?;

        LanguageUsage::from_byte_counts(&byte_counts)
            .map(Some)
            .map_err(|e| StatsClientError::malformed(&url, e.to_string()))
    }

    // ============================================
    // COMMITS
    // ============================================

    /// Oldest and newest commit of the default listing.
    ///
    /// The newest is the first element of the first page; the oldest is the
    /// last element of the last page. Both rely on GitHub's reverse
    /// chronological default order, and the two listings are separate
    /// requests: a push landing between them makes the range inconsistent.
    pub async fn get_commit_range(
        &self,
        credentials: &Credentials,
    ) -> Result<CommitRange, StatsClientError> {
        let newest = self.get_last_commit(credentials).await?;
        let oldest = self.get_first_commit(credentials).await?;

        Ok(CommitRange::new(oldest, newest))
    }

    /// Total commits, as `total_commits + 1` of comparing the oldest commit with
    /// the newest (the compare API does not count its base).
    ///
    /// Returns `0` when the comparison carries no `total_commits`.
    pub async fn get_commit_count(&self, credentials: &Credentials) -> Result<u64, StatsClientError> {
        let range = self.get_commit_range(credentials).await?;
        let url = self.repo_url(credentials, &[COMPARE_ENDPOINT, &range.compare_spec()])?;

        let Some(comparison) = self.fetch_object(&url, credentials).await? else {
            return Ok(0);
        };

        let count = match comparison.get(TOTAL_COMMITS_FIELD) {
            None | Some(Value::Null) => {
                warn!(
                    "{}: compare response has no {TOTAL_COMMITS_FIELD}, reporting 0",
                    credentials.full_name()
                );
                0
            }
            Some(total) => {
                let total_commits = total.as_u64().ok_or_else(|| {
                    StatsClientError::malformed(
                        &url,
                        format!("{TOTAL_COMMITS_FIELD} is not a non-negative integer: {total}"),
                    )
                })?;
                // The compare base is not counted; a total of u64::MAX leaves no room for it
                total_commits.checked_add(1).ok_or_else(|| {
                    StatsClientError::malformed(
                        &url,
                        format!("{TOTAL_COMMITS_FIELD} out of range: {total_commits}"),
                    )
                })?
            }
        };

        info!("{}: {} commits", credentials.full_name(), count);
        Ok(count)
    }

    /// Every commit authored by `contributor`, reachable from the newest commit.
    ///
    /// Pages of 100 are requested until one comes back **empty**; a short page
    /// is not treated as the end.
    pub async fn get_all_commits_by_contributor(
        &self,
        credentials: &Credentials,
        contributor: &str,
    ) -> Result<Vec<CommitRecord>, StatsClientError> {
        let head = self.get_last_commit(credentials).await?;
        let mut commits = Vec::new();
        let mut page_number: u32 = 1;

        loop {
            let mut url = self.repo_url(credentials, &[COMMITS_ENDPOINT])?;
            url.query_pairs_mut()
                .append_pair("sha", &head.sha)
                .append_pair("author", contributor)
                .append_pair("per_page", CONTRIBUTOR_COMMITS_PER_PAGE)
                .append_pair("page", &page_number.to_string());

            let page: Page<CommitRecord> = self.fetch_array(&url, credentials).await?;
            if page.is_empty() {
                break;
            }

            debug!(
                "{}: page {} has {} commits by {}",
                credentials.full_name(),
                page_number,
                page.len(),
                contributor
            );
            commits.extend(page.items);
            page_number += 1;
        }

        info!(
            "{}: {} commits by {} across {} pages",
            credentials.full_name(),
            commits.len(),
            contributor,
            page_number - 1
        );
        Ok(commits)
    }

    /// Newest commit: first element of the first page of `/commits`.
    async fn get_last_commit(&self, credentials: &Credentials) -> Result<CommitRef, StatsClientError> {
        let url = self.repo_url(credentials, &[COMMITS_ENDPOINT])?;
        let page: Page<CommitRecord> = self.fetch_array(&url, credentials).await?;

        let record = page
            .first()
            .ok_or_else(|| StatsClientError::malformed(&url, "commit list is empty"))?;

        CommitRef::from_record(record).map_err(|e| StatsClientError::malformed(&url, e.to_string()))
    }

    /// Oldest commit: last element of the last page of `/commits`.
    async fn get_first_commit(
        &self,
        credentials: &Credentials,
    ) -> Result<CommitRef, StatsClientError> {
        let url = self.repo_url(credentials, &[COMMITS_ENDPOINT])?;
        let (page, page_url) = self.fetch_last_page::<CommitRecord>(&url, credentials).await?;

        let record = page
            .last()
            .ok_or_else(|| StatsClientError::malformed(&page_url, "commit list is empty"))?;

        CommitRef::from_record(record)
            .map_err(|e| StatsClientError::malformed(&page_url, e.to_string()))
    }

    // ============================================
    // REQUEST PRIMITIVES
    // ============================================

    /// `{base}/repos/{owner}/{repo}/{segments...}`, each segment percent-encoded.
    fn repo_url(
        &self,
        credentials: &Credentials,
        segments: &[&str],
    ) -> Result<Url, StatsClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                StatsClientError::malformed(&self.base_url, "API base URL cannot carry a path")
            })?;
            path.pop_if_empty()
                .push(REPOS_SEGMENT)
                .push(credentials.owner())
                .push(credentials.repo())
                .extend(segments);
        }
        Ok(url)
    }

    async fn repo_string_field(
        &self,
        credentials: &Credentials,
        field: &'static str,
    ) -> Result<Option<String>, StatsClientError> {
        let url = self.repo_url(credentials, &[])?;
        let Some(repo) = self.fetch_object(&url, credentials).await? else {
            return Ok(None);
        };

        match repo.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(StatsClientError::malformed(
                &url,
                format!("'{field}' is not a string: {other}"),
            )),
        }
    }

    /// GET `url` and follow its `rel="last"` link, if any, to the final page.
    ///
    /// Returns the page together with the URL it was fetched from. Links that
    /// leave the API origin are refused so the token is never sent elsewhere.
    async fn fetch_last_page<T: DeserializeOwned>(
        &self,
        url: &Url,
        credentials: &Credentials,
    ) -> Result<(Page<T>, Url), StatsClientError> {
        let first_page: Page<T> = self.fetch_array(url, credentials).await?;

        let Some(last) = first_page.links.last.as_deref() else {
            return Ok((first_page, url.clone()));
        };

        let last_url = Url::parse(last).map_err(|e| {
            StatsClientError::malformed(url, format!("unusable rel=\"last\" link {last:?}: {e}"))
        })?;
        if last_url == *url {
            return Ok((first_page, last_url));
        }

        if last_url.origin() != self.base_url.origin() {
            return Err(StatsClientError::malformed(
                url,
                format!("last-page link points outside the API host: {last_url}"),
            ));
        }

        debug!("Following rel=\"last\" to {last_url}");
        let last_page = self.fetch_array(&last_url, credentials).await?;
        Ok((last_page, last_url))
    }

    /// GET a JSON array into a [`Page`], keeping the Link relations.
    async fn fetch_array<T: DeserializeOwned>(
        &self,
        url: &Url,
        credentials: &Credentials,
    ) -> Result<Page<T>, StatsClientError> {
        let (body, links) = self.fetch_json(url, credentials).await?;

        if !body.is_array() {
            return Err(StatsClientError::malformed(url, "expected a JSON array"));
        }

        let items: Vec<T> = serde_json::from_value(body)
            .map_err(|e| StatsClientError::malformed(url, format!("unexpected array element: {e}")))?;

        Ok(Page::new(items, links))
    }

    /// GET a JSON object. A literal `null` body yields `None`.
    async fn fetch_object(
        &self,
        url: &Url,
        credentials: &Credentials,
    ) -> Result<Option<Map<String, Value>>, StatsClientError> {
        let (body, _) = self.fetch_json(url, credentials).await?;

        match body {
            Value::Object(object) => Ok(Some(object)),
            Value::Null => Ok(None),
            _ => Err(StatsClientError::malformed(url, "expected a JSON object")),
        }
    }

    /// Signed GET returning the parsed body and the response's Link relations.
    async fn fetch_json(
        &self,
        url: &Url,
        credentials: &Credentials,
    ) -> Result<(Value, LinkRelations), StatsClientError> {
        let mut authorization = HeaderValue::from_str(&credentials.token().authorization_header())
            .map_err(|_| StatsClientError::invalid_token())?;
        authorization.set_sensitive(true);

        debug!("GET {url}");

        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, GITHUB_JSON_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| StatsClientError::from_transport(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {url} returned HTTP {}", status.as_u16());
            return Err(StatsClientError::request_failed(status.as_u16(), url));
        }

        let links = LinkRelations::from_headers(response.headers());
        let bytes = response
            .bytes()
            .await
            .map_err(|e| StatsClientError::from_transport(url, &e))?;

        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| StatsClientError::malformed(url, format!("invalid JSON: {e}")))?;

        Ok((body, links))
    }
}
