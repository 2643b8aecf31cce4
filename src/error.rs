use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrakdError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("GitHub search failed: {0}")]
    GitHubSearch(String),

    #[error("Judge response malformed: {0}")]
    JudgeResponse(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Pipeline misaligned at {stage}: expected {expected} entries, got {actual}")]
    PipelineMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, CrakdError>;
