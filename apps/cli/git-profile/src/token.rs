//! GitHub token resolution.
//!
//! Only the binary touches the process environment; everything below it
//! receives the token explicitly inside [`models::Credentials`].

use common::RedactedToken;

use log::{debug, warn};

pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Load `.env` from the working directory, if present, into the environment.
///
/// A missing or unreadable file is not an error: the variable may already be
/// set by the shell.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Ignoring unreadable .env file: {e}"),
    }
}

/// Resolve the token through `lookup` (normally `std::env::var`).
///
/// A missing or blank token is passed through as an empty token: GitHub then
/// answers 401/403 and the failure surfaces as a request error.
pub fn resolve_token<F>(lookup: F) -> RedactedToken
where
    F: FnOnce(&str) -> Option<String>,
{
    match lookup(GITHUB_TOKEN_VAR) {
        Some(value) if !value.trim().is_empty() => {
            let token = RedactedToken::new(value.trim());
            debug!("{GITHUB_TOKEN_VAR} found ({} chars)", token.len());
            token
        }
        _ => {
            warn!("{GITHUB_TOKEN_VAR} is not set; requests will be unauthenticated and likely rejected");
            RedactedToken::default()
        }
    }
}

/// [`resolve_token`] against the real process environment.
pub fn token_from_env() -> RedactedToken {
    resolve_token(|name| std::env::var(name).ok())
}
