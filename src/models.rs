//! Domain records for developer search and ranking.
//!
//! `Developer` is the raw profile shape produced by the data source; it is
//! immutable once fetched. `RankedDeveloper` is the output entity of a single
//! ranking call and carries every profile field plus the three scores.

use serde::{Deserialize, Serialize};

/// One of a developer's top repositories, ordered by stars at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// A raw developer profile as returned by the data source.
///
/// Numeric fields default to 0 when absent; the data source contract is that
/// `username` is always present and non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Developer {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub total_contributions: u64,
    #[serde(default)]
    pub top_repositories: Vec<Repository>,
}

/// A developer with every score attached, produced once per ranking call.
///
/// Serializes flat: profile fields and score fields side by side in one
/// record. `analyzed` is false when the qualitative judge could not score the
/// profile and the sentinel values were substituted.
#[derive(Debug, Clone, Serialize)]
pub struct RankedDeveloper {
    #[serde(flatten)]
    pub profile: Developer,
    pub cracked_score: f64,
    pub github_score: f64,
    pub ensemble_score: f64,
    pub reasoning: String,
    pub analyzed: bool,
}

impl RankedDeveloper {
    /// Username of the underlying profile.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.profile.username
    }
}
