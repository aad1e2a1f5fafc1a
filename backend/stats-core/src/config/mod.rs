use crate::error::config::ConfigError;
use crate::{DEFAULT_USER_AGENT, GITHUB_API_BASE_URL};

use common::ErrorLocation;
use models::summary::builder::NO_DESCRIPTION_PLACEHOLDER;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_DIR_NAME: &str = "git-profile";
const CONFIG_VERSION: u32 = 1;
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 300;

// ============================================
// CONFIG STRUCTS
// ============================================

/// How to reach the GitHub API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_description_placeholder")]
    pub description_placeholder: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            description_placeholder: default_description_placeholder(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: ApiConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_base_url() -> String {
    GITHUB_API_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_description_placeholder() -> String {
    NO_DESCRIPTION_PLACEHOLDER.to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

/// Platform config directory for git-profile (e.g. `~/.config/git-profile`).
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigDir`] when the platform has no notion of a
/// per-user config directory.
#[track_caller]
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| ConfigError::NoConfigDir {
            reason: String::from("No platform config directory; pass --config-dir explicitly"),
            location: ErrorLocation::from(Location::caller()),
        })
}

impl StatsConfig {
    /// Load config from {config_dir}/config.json.
    ///
    /// # Returns
    ///
    /// Returns `Ok(StatsConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is unreadable or invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::Unreadable {
                path: config_path.clone(),
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let config: StatsConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::Syntax {
                path: config_path.clone(),
                line: e.line(),
                column: e.column(),
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::invalid_field(
                "version",
                format!("{} (expected 1-{})", self.version, CONFIG_VERSION),
            ));
        }

        let base_url = &self.api.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::invalid_field(
                "api.base_url",
                format!("{base_url} is not an http(s) URL"),
            ));
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.api.timeout_secs) {
            return Err(ConfigError::invalid_field(
                "api.timeout_secs",
                format!(
                    "{}s (must be {}-{})",
                    self.api.timeout_secs, MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS
                ),
            ));
        }

        // GitHub rejects requests without a User-Agent
        if self.api.user_agent.trim().is_empty() {
            return Err(ConfigError::invalid_field("api.user_agent", "cannot be empty"));
        }

        Ok(())
    }
}
