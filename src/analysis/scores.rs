//! Normalizes feature vectors into bounded quantitative scores.

use super::features::FeatureVector;

/// Score each row of the feature matrix into `[0, 100]`, in input order.
///
/// The developer with the largest feature sum scores exactly 100 and the
/// rest scale proportionally. When every feature sum is 0 (including the
/// empty matrix) every score is 0.
///
/// Scores are relative to the candidate set of a single ranking call only;
/// they are not comparable across calls.
#[must_use]
pub fn quantitative_scores(features: &[FeatureVector]) -> Vec<f64> {
    let max_sum = features
        .iter()
        .map(FeatureVector::sum)
        .fold(0.0_f64, f64::max);

    if max_sum > 0.0 {
        features
            .iter()
            .map(|row| row.sum() / max_sum * 100.0)
            .collect()
    } else {
        vec![0.0; features.len()]
    }
}
