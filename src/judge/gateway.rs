//! Concurrent fan-out of judging requests.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::judge::{DeveloperJudge, JudgeVerdict};
use crate::models::Developer;

/// Dispatches one judging request per developer and joins the results.
///
/// The gateway is the only place the pipeline touches concurrency: it spawns
/// N independent tasks, bounds each by a wall-clock timeout, waits for all of
/// them, and writes every result back into its original index slot so output
/// order matches input order regardless of completion order. One slow or
/// failing request never blocks or corrupts the others.
pub struct JudgeGateway {
    judge: Arc<dyn DeveloperJudge>,
    timeout: Duration,
}

impl JudgeGateway {
    pub fn new(judge: Arc<dyn DeveloperJudge>, timeout: Duration) -> Self {
        Self { judge, timeout }
    }

    /// Judge every developer concurrently, preserving input order.
    ///
    /// Always returns exactly `developers.len()` verdicts; a task that times
    /// out, panics, or fails yields `JudgeVerdict::Failed` in its slot. Empty
    /// input spawns nothing.
    pub async fn judge_all(&self, developers: &[Developer], query: &str) -> Vec<JudgeVerdict> {
        if developers.is_empty() {
            return Vec::new();
        }

        let query: Arc<str> = Arc::from(query);
        let mut tasks: JoinSet<(usize, JudgeVerdict)> = JoinSet::new();

        for (index, developer) in developers.iter().cloned().enumerate() {
            let judge = Arc::clone(&self.judge);
            let query = Arc::clone(&query);
            let timeout = self.timeout;

            tasks.spawn(async move {
                let verdict =
                    match tokio::time::timeout(timeout, judge.judge(&developer, &query)).await {
                        Ok(verdict) => verdict,
                        Err(_) => {
                            tracing::warn!(
                                username = %developer.username,
                                timeout_secs = timeout.as_secs(),
                                "judge request timed out"
                            );
                            JudgeVerdict::Failed {
                                reason: format!("timed out after {}s", timeout.as_secs()),
                            }
                        }
                    };
                (index, verdict)
            });
        }

        let mut verdicts: Vec<Option<JudgeVerdict>> = vec![None; developers.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, verdict)) => verdicts[index] = Some(verdict),
                Err(err) => {
                    tracing::error!(error = %err, "judge task aborted");
                }
            }
        }

        verdicts
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| JudgeVerdict::Failed {
                    reason: "judge task aborted".to_string(),
                })
            })
            .collect()
    }
}
