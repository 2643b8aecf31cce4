//! Score fusion and ranking orchestration.
//!
//! `Ranker` is the entry point of the pipeline: it runs the quantitative
//! path (feature engineering, score normalization) and the qualitative path
//! (concurrent judge fan-out), fuses both signals per developer, and returns
//! a deterministically ordered ranking.

use std::sync::Arc;
use std::time::Duration;

use crate::analysis::{engineer_features, quantitative_scores};
use crate::config::RankingConfig;
use crate::error::{CrakdError, Result};
use crate::judge::{DeveloperJudge, JudgeGateway, JudgeVerdict};
use crate::models::{Developer, RankedDeveloper};

/// Weighting between the qualitative (AI-judged) and quantitative
/// (metric-based) scores. Defaults to the fixed 60/40 split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnsembleWeights {
    pub qualitative: f64,
    pub quantitative: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            qualitative: 0.6,
            quantitative: 0.4,
        }
    }
}

impl From<&RankingConfig> for EnsembleWeights {
    fn from(config: &RankingConfig) -> Self {
        Self {
            qualitative: config.qualitative_weight,
            quantitative: config.quantitative_weight,
        }
    }
}

impl EnsembleWeights {
    /// Combined score for one developer.
    #[must_use]
    pub fn combine(&self, cracked_score: f64, github_score: f64) -> f64 {
        self.qualitative * cracked_score + self.quantitative * github_score
    }
}

/// Observer for coarse ranking milestones.
///
/// Purely advisory: sinks receive human-readable status strings and must not
/// influence control flow or results. The CLI backs this with a spinner.
pub trait ProgressSink: Send + Sync {
    fn update(&self, message: &str);
}

/// Merge the three per-developer sequences into output entities.
///
/// All three slices are aligned by original input order; a length mismatch
/// means an upstream stage violated its contract and is fatal. A `Failed`
/// verdict becomes the zero-score sentinel with `analyzed = false`.
pub fn fuse(
    developers: &[Developer],
    verdicts: &[JudgeVerdict],
    github_scores: &[f64],
    weights: &EnsembleWeights,
) -> Result<Vec<RankedDeveloper>> {
    check_alignment("judge verdicts", developers.len(), verdicts.len())?;
    check_alignment("quantitative scores", developers.len(), github_scores.len())?;

    let ranked = developers
        .iter()
        .zip(verdicts)
        .zip(github_scores)
        .map(|((developer, verdict), &github_score)| {
            let cracked_score = verdict.score();
            RankedDeveloper {
                profile: developer.clone(),
                cracked_score,
                github_score,
                ensemble_score: weights.combine(cracked_score, github_score),
                reasoning: verdict.reasoning().to_string(),
                analyzed: verdict.is_scored(),
            }
        })
        .collect();
    Ok(ranked)
}

fn check_alignment(stage: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CrakdError::PipelineMismatch {
            stage,
            expected,
            actual,
        })
    }
}

/// Sort a fused ranking by ensemble score, highest first.
///
/// The sort is explicitly stable: developers with exactly equal ensemble
/// scores keep their original relative order, so the full ordering is
/// reproducible for fixed inputs and verdicts.
pub fn sort_ranking(ranked: &mut [RankedDeveloper]) {
    ranked.sort_by(|a, b| b.ensemble_score.total_cmp(&a.ensemble_score));
}

/// Orchestrates one ranking call end to end.
pub struct Ranker {
    gateway: JudgeGateway,
    weights: EnsembleWeights,
}

impl Ranker {
    /// Build a ranker around an injected judge. Lifecycle of the judge is
    /// owned by the caller.
    pub fn new(judge: Arc<dyn DeveloperJudge>, timeout: Duration, weights: EnsembleWeights) -> Self {
        Self {
            gateway: JudgeGateway::new(judge, timeout),
            weights,
        }
    }

    /// Rank a candidate set against the original free-text query.
    ///
    /// Empty input returns an empty ranking immediately, with no collaborator
    /// calls. The call succeeds even when some or all judge requests fail;
    /// those developers carry the sentinel score instead.
    pub async fn rank(
        &self,
        developers: &[Developer],
        query: &str,
    ) -> Result<Vec<RankedDeveloper>> {
        self.rank_with_progress(developers, query, None).await
    }

    /// Like [`Ranker::rank`], reporting milestones to an optional sink.
    pub async fn rank_with_progress(
        &self,
        developers: &[Developer],
        query: &str,
        progress: Option<&dyn ProgressSink>,
    ) -> Result<Vec<RankedDeveloper>> {
        if developers.is_empty() {
            return Ok(Vec::new());
        }

        report(progress, "engineering features");
        let features = engineer_features(developers);
        let github_scores = quantitative_scores(&features);

        report(
            progress,
            &format!("rating {} developers", developers.len()),
        );
        let verdicts = self.gateway.judge_all(developers, query).await;
        report(progress, "rating complete");

        let mut ranked = fuse(developers, &verdicts, &github_scores, &self.weights)?;
        sort_ranking(&mut ranked);
        Ok(ranked)
    }
}

fn report(progress: Option<&dyn ProgressSink>, message: &str) {
    if let Some(sink) = progress {
        sink.update(message);
    }
}
