// Unit tests for StatsConfig load/validate

use crate::GITHUB_API_BASE_URL;
use crate::config::StatsConfig;
use crate::error::config::ConfigError;

use tempfile::TempDir;

#[test]
fn given_missing_file_when_loading_then_returns_defaults() {
    // GIVEN: An empty config directory
    let dir = TempDir::new().unwrap();

    // WHEN: Loading
    let config = StatsConfig::load(dir.path()).unwrap();

    // THEN: Defaults point at the public API
    assert_eq!(config, StatsConfig::default());
    assert_eq!(config.api.base_url, GITHUB_API_BASE_URL);
    assert_eq!(config.api.timeout_secs, 30);
}

/// **VALUE**: Verifies every section of a hand-written config is honored.
///
/// **WHY THIS MATTERS**: Enterprise users point `base_url` at their own host; a
/// section silently reset to defaults sends their token to api.github.com.
///
/// **BUG THIS CATCHES**: Would catch a serde rename or a misplaced section default.
#[test]
fn given_full_config_file_when_loading_then_every_section_read() {
    // GIVEN: A config with every section customized
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{
            "version": 1,
            "api": {
                "base_url": "https://github.example.com/api/v3",
                "timeout_secs": 5,
                "user_agent": "acme-stats"
            },
            "display": {"description_placeholder": "(none)"}
        }"#,
    )
    .unwrap();

    // WHEN: Loading
    let config = StatsConfig::load(dir.path()).unwrap();

    // THEN: Nothing fell back to defaults
    assert_eq!(config.api.base_url, "https://github.example.com/api/v3");
    assert_eq!(config.api.timeout_secs, 5);
    assert_eq!(config.api.user_agent, "acme-stats");
    assert_eq!(config.display.description_placeholder, "(none)");
}

#[test]
fn given_partial_json_when_loading_then_fills_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"api": {"timeout_secs": 10}}"#,
    )
    .unwrap();

    let config = StatsConfig::load(dir.path()).unwrap();

    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.api.base_url, GITHUB_API_BASE_URL);
    assert_eq!(config.version, 1);
}

#[test]
fn given_corrupt_json_when_loading_then_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "{ not json").unwrap();

    let result = StatsConfig::load(dir.path());

    match result {
        Err(ConfigError::Syntax { line, column, .. }) => {
            assert_eq!(line, 1);
            assert!(column > 0);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn given_zero_timeout_when_validating_then_returns_validation_error() {
    let mut config = StatsConfig::default();
    config.api.timeout_secs = 0;

    let err = config.validate().unwrap_err();

    assert!(matches!(err, ConfigError::InvalidField { .. }));
    assert_eq!(err.field(), Some("api.timeout_secs"));
}

#[test]
fn given_non_http_base_url_when_validating_then_returns_validation_error() {
    let mut config = StatsConfig::default();
    config.api.base_url = "ftp://api.github.com".to_string();

    let err = config.validate().unwrap_err();

    assert_eq!(err.field(), Some("api.base_url"));
}

#[test]
fn given_future_version_when_validating_then_returns_validation_error() {
    let mut config = StatsConfig::default();
    config.version = 99;

    let err = config.validate().unwrap_err();

    assert_eq!(err.field(), Some("version"));
    assert!(err.to_string().contains("Config Invalid Error: version"));
}

#[test]
fn given_out_of_range_file_value_when_loading_then_invalid_field_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"api": {"user_agent": "  "}}"#,
    )
    .unwrap();

    let err = StatsConfig::load(dir.path()).unwrap_err();

    assert_eq!(err.field(), Some("api.user_agent"));
}
