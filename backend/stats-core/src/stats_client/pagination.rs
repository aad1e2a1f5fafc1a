//! Link-header pagination.
//!
//! GitHub Link headers look like:
//! `<https://api.github.com/repositories/1/commits?page=2>; rel="next", <...?page=5>; rel="last"`
//!
//! Relations may come in any order and any subset; unknown relations are
//! ignored.

use reqwest::header::{HeaderMap, LINK};

/// Navigation URLs extracted from a `Link` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRelations {
    pub first: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

impl LinkRelations {
    /// Read the `Link` header, if any, from a response's headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map(parse_link_header)
            .unwrap_or_default()
    }

    /// True when the server says more pages follow this one.
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// Parse a `Link` header into its navigation relations.
///
/// Entries without a `<url>` or a `rel` parameter are skipped. An entry may
/// carry several space-separated relation types (`rel="next last"`).
pub fn parse_link_header(link_header: &str) -> LinkRelations {
    let mut relations = LinkRelations::default();

    for entry in link_header.split(',') {
        let mut url = None;
        let mut rel = None;

        for segment in entry.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(value) = segment.strip_prefix("rel=") {
                rel = Some(value.trim_matches('"'));
            }
        }

        let (Some(url), Some(rel)) = (url, rel) else {
            continue;
        };

        for rel_type in rel.split_whitespace() {
            let slot = match rel_type {
                "first" => &mut relations.first,
                "prev" => &mut relations.prev,
                "next" => &mut relations.next,
                "last" => &mut relations.last,
                _ => continue,
            };
            *slot = Some(url.to_string());
        }
    }

    relations
}

/// One page of a list endpoint.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub links: LinkRelations,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, links: LinkRelations) -> Self {
        Self { items, links }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }
}
