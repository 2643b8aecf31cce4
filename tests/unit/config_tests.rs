//! Unit tests for configuration loading and validation.

use std::io::Write;

use crakd::config::Config;
use crakd::CrakdError;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn defaults_match_documented_values() {
    let config = Config::default();
    assert_eq!(config.github.min_followers, 100);
    assert_eq!(config.github.min_repos, 10);
    assert_eq!(config.judge.api_url, "https://api.x.ai/v1");
    assert_eq!(config.judge.model, "grok-4-1-fast-reasoning");
    assert_eq!(config.judge.timeout_secs, 30);
    assert!((config.ranking.qualitative_weight - 0.6).abs() < f64::EPSILON);
    assert!((config.ranking.quantitative_weight - 0.4).abs() < f64::EPSILON);
    assert_eq!(config.search.limit, 10);
}

#[test]
fn partial_file_keeps_defaults_for_missing_sections() {
    let file = write_config(
        r#"
[github]
min_followers = 500
"#,
    );

    let config = Config::load(Some(file.path())).expect("load config");
    assert_eq!(config.github.min_followers, 500);
    assert_eq!(config.github.min_repos, 10);
    assert!((config.ranking.qualitative_weight - 0.6).abs() < f64::EPSILON);
}

#[test]
fn custom_weights_are_honored() {
    let file = write_config(
        r#"
[ranking]
qualitative_weight = 0.8
quantitative_weight = 0.2
"#,
    );

    let config = Config::load(Some(file.path())).expect("load config");
    assert!((config.ranking.qualitative_weight - 0.8).abs() < f64::EPSILON);
    assert!((config.ranking.quantitative_weight - 0.2).abs() < f64::EPSILON);
}

#[test]
fn negative_weight_is_rejected() {
    let file = write_config(
        r#"
[ranking]
qualitative_weight = -0.5
"#,
    );

    let err = Config::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, CrakdError::Config(_)));
}

#[test]
fn zero_weight_sum_is_rejected() {
    let file = write_config(
        r#"
[ranking]
qualitative_weight = 0.0
quantitative_weight = 0.0
"#,
    );

    assert!(Config::load(Some(file.path())).is_err());
}

#[test]
fn zero_timeout_is_rejected() {
    let file = write_config(
        r#"
[judge]
timeout_secs = 0
"#,
    );

    assert!(Config::load(Some(file.path())).is_err());
}

#[test]
fn missing_explicit_file_is_an_error() {
    let err = Config::load(Some(std::path::Path::new("/nonexistent/crakd.toml"))).unwrap_err();
    assert!(matches!(err, CrakdError::Config(_)));
}

#[test]
fn malformed_toml_is_an_error() {
    let file = write_config("[github\nmin_followers = ");
    assert!(Config::load(Some(file.path())).is_err());
}

#[test]
fn missing_api_key_surfaces_as_missing_config() {
    let config = Config::default();
    let err = config.judge.require_api_key().unwrap_err();
    assert!(matches!(err, CrakdError::MissingConfig(_)));
    assert!(err.to_string().contains("XAI_API_KEY"));
}

#[test]
fn blank_github_token_is_rejected() {
    let github = crakd::config::GitHubConfig {
        token: Some("   ".to_string()),
        ..Default::default()
    };
    assert!(github.require_token().is_err());
}
