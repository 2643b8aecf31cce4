use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CrakdError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub judge: JudgeConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration from an explicit path, `CRAKD_CONFIG`, or the
    /// global config file, then apply environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("CRAKD_CONFIG").ok().map(PathBuf::from));

        let mut config = if let Some(path) = explicit {
            Self::load_file(&path)?.ok_or_else(|| {
                CrakdError::Config(format!("config file not found: {}", path.display()))
            })?
        } else {
            match Self::global_path() {
                Some(path) => Self::load_file(&path)?.unwrap_or_default(),
                None => Self::default(),
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("crakd/config.toml"))
    }

    fn load_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| CrakdError::Config(format!("read config {}: {err}", path.display())))?;
        let config = toml::from_str(&raw)
            .map_err(|err| CrakdError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(config))
    }

    fn apply_env_overrides(&mut self) {
        if let Some(token) = env_string("GITHUB_TOKEN") {
            self.github.token = Some(token);
        }
        if let Some(key) = env_string("XAI_API_KEY") {
            self.judge.api_key = Some(key);
        }
        if let Some(url) = env_string("CRAKD_JUDGE_URL") {
            self.judge.api_url = url;
        }
        if let Some(model) = env_string("CRAKD_JUDGE_MODEL") {
            self.judge.model = model;
        }
    }

    fn validate(&self) -> Result<()> {
        self.ranking.validate()?;
        if self.judge.timeout_secs == 0 {
            return Err(CrakdError::Config(
                "judge.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Data source settings: token and candidate-filter thresholds used to build
/// the GitHub user-search string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_github_api_url")]
    pub api_url: String,
    #[serde(default = "default_min_followers")]
    pub min_followers: u64,
    #[serde(default = "default_min_repos")]
    pub min_repos: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_github_api_url(),
            min_followers: default_min_followers(),
            min_repos: default_min_repos(),
        }
    }
}

impl GitHubConfig {
    /// Token for the GraphQL API; required for any search.
    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                CrakdError::MissingConfig(
                    "GitHub token (set GITHUB_TOKEN or [github].token)".to_string(),
                )
            })
    }
}

/// Judge service settings for the xAI chat-completions API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_judge_api_url")]
    pub api_url: String,
    #[serde(default = "default_judge_model")]
    pub model: String,
    #[serde(default = "default_judge_temperature")]
    pub temperature: f64,
    #[serde(default = "default_judge_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_judge_api_url(),
            model: default_judge_model(),
            temperature: default_judge_temperature(),
            timeout_secs: default_judge_timeout_secs(),
        }
    }
}

impl JudgeConfig {
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                CrakdError::MissingConfig(
                    "judge API key (set XAI_API_KEY or [judge].api_key)".to_string(),
                )
            })
    }

    /// Per-request wall-clock budget.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Ensemble weighting between the qualitative and quantitative scores.
///
/// The 60/40 split is the fixed default; configs may shift it but both
/// weights must be non-negative and sum to a positive total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_qualitative_weight")]
    pub qualitative_weight: f64,
    #[serde(default = "default_quantitative_weight")]
    pub quantitative_weight: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            qualitative_weight: default_qualitative_weight(),
            quantitative_weight: default_quantitative_weight(),
        }
    }
}

impl RankingConfig {
    fn validate(&self) -> Result<()> {
        let valid = self.qualitative_weight >= 0.0
            && self.quantitative_weight >= 0.0
            && self.qualitative_weight + self.quantitative_weight > 0.0;
        if valid {
            Ok(())
        } else {
            Err(CrakdError::Config(format!(
                "ranking weights must be non-negative with a positive sum, got {} and {}",
                self.qualitative_weight, self.quantitative_weight
            )))
        }
    }
}

/// Search front-end defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_search_limit(),
        }
    }
}

fn default_github_api_url() -> String {
    "https://api.github.com/graphql".to_string()
}

const fn default_min_followers() -> u64 {
    100
}

const fn default_min_repos() -> u64 {
    10
}

fn default_judge_api_url() -> String {
    "https://api.x.ai/v1".to_string()
}

fn default_judge_model() -> String {
    "grok-4-1-fast-reasoning".to_string()
}

const fn default_judge_temperature() -> f64 {
    0.7
}

const fn default_judge_timeout_secs() -> u64 {
    30
}

const fn default_qualitative_weight() -> f64 {
    0.6
}

const fn default_quantitative_weight() -> f64 {
    0.4
}

const fn default_search_limit() -> usize {
    10
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
