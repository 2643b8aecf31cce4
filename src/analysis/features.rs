//! Converts raw developer profiles into fixed-length numeric feature vectors.

use crate::models::{Developer, Repository};

/// Number of engineered features per developer.
pub const FEATURE_COUNT: usize = 4;

/// One row of the feature matrix: `[followers, public_repos, avg_stars,
/// avg_forks]`.
///
/// Rows carry no key; a row is tied to its developer purely by position in
/// the engineered matrix, which always matches input order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Engineer the feature vector for a single profile.
    ///
    /// A developer with no top repositories contributes 0 for both repo
    /// averages rather than NaN.
    #[must_use]
    pub fn from_profile(dev: &Developer) -> Self {
        let avg_stars = mean(&dev.top_repositories, |repo| repo.stargazers_count);
        let avg_forks = mean(&dev.top_repositories, |repo| repo.forks_count);

        Self([
            dev.followers as f64,
            dev.public_repos as f64,
            avg_stars,
            avg_forks,
        ])
    }

    /// Sum of all features, the basis for quantitative ranking.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// The raw feature values.
    #[must_use]
    pub const fn as_array(&self) -> [f64; FEATURE_COUNT] {
        self.0
    }
}

fn mean(repos: &[Repository], metric: impl Fn(&Repository) -> u64) -> f64 {
    if repos.is_empty() {
        return 0.0;
    }
    let total: u64 = repos.iter().map(metric).sum();
    total as f64 / repos.len() as f64
}

/// Build the feature matrix for a candidate set, one row per developer in
/// input order.
#[must_use]
pub fn engineer_features(developers: &[Developer]) -> Vec<FeatureVector> {
    let matrix: Vec<FeatureVector> = developers.iter().map(FeatureVector::from_profile).collect();
    tracing::info!(developers = matrix.len(), "engineered feature vectors");
    matrix
}
