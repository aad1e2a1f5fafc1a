pub mod config;
pub mod error;
pub mod stats_client;

#[cfg(test)]
mod tests;

pub use stats_client::RepoStatsClient;
pub use stats_client::pagination::{LinkRelations, Page, parse_link_header};

pub const GITHUB_API_HOSTNAME: &str = "api.github.com";
pub const GITHUB_API_BASE_URL: &str = const_format::concatcp!("https://", GITHUB_API_HOSTNAME);
pub const DEFAULT_USER_AGENT: &str =
    const_format::concatcp!("git-profile/", env!("CARGO_PKG_VERSION"));
