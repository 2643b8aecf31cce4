//! Qualitative judging of developer profiles.
//!
//! The judge itself is an external AI service; this module defines the
//! contract the ranking pipeline consumes, the concurrent fan-out that
//! dispatches one judging request per developer, and the xAI-backed
//! implementation.

mod gateway;
mod xai;

use async_trait::async_trait;

use crate::models::Developer;

pub use gateway::JudgeGateway;
pub use xai::XaiClient;

/// Reasoning text substituted when a profile could not be judged.
pub const FAILURE_REASONING: &str = "Error analyzing profile.";

/// Outcome of judging one developer profile.
///
/// `Failed` is distinct from a legitimate score of 0 so that downstream
/// consumers can tell "scored zero" apart from "could not be scored". Score
/// fusion maps `Failed` to the zero-score sentinel but marks the output
/// entity as not analyzed.
#[derive(Debug, Clone, PartialEq)]
pub enum JudgeVerdict {
    Scored { score: f64, reasoning: String },
    Failed { reason: String },
}

impl JudgeVerdict {
    /// Qualitative score, 0 for a failed judgment.
    #[must_use]
    pub fn score(&self) -> f64 {
        match self {
            Self::Scored { score, .. } => *score,
            Self::Failed { .. } => 0.0,
        }
    }

    /// Reasoning for display; failed judgments always render the fixed
    /// sentinel text regardless of the underlying cause.
    #[must_use]
    pub fn reasoning(&self) -> &str {
        match self {
            Self::Scored { reasoning, .. } => reasoning,
            Self::Failed { .. } => FAILURE_REASONING,
        }
    }

    #[must_use]
    pub const fn is_scored(&self) -> bool {
        matches!(self, Self::Scored { .. })
    }
}

/// Contract for the qualitative judging collaborator.
///
/// Given one developer's raw profile and the original free-text query,
/// produce a fit score and a short justification. Implementations must never
/// propagate an error: any internal failure (network, timeout, malformed
/// model output) is reported as `JudgeVerdict::Failed`.
#[async_trait]
pub trait DeveloperJudge: Send + Sync {
    async fn judge(&self, developer: &Developer, query: &str) -> JudgeVerdict;
}
