//! Free-text search query interpretation.
//!
//! A query like "find me a cracked rust engineer" is reduced to a structured
//! `{language, role, keywords}` tuple before it reaches the data source. Two
//! interpreters exist: a heuristic token scanner that needs no network, and
//! an AI-backed parser on [`crate::judge::XaiClient`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Structured form of a free-text developer search query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuery {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ParsedQuery {
    /// Fallback when no interpreter could make sense of the query: every
    /// token becomes a keyword.
    #[must_use]
    pub fn keywords_only(query: &str) -> Self {
        Self {
            language: None,
            role: None,
            keywords: query.split_whitespace().map(str::to_string).collect(),
        }
    }
}

/// Contract for turning a free-text query into a [`ParsedQuery`].
///
/// Interpreters never fail; a query that resists parsing degrades to
/// [`ParsedQuery::keywords_only`].
#[async_trait]
pub trait QueryInterpreter: Send + Sync {
    async fn parse(&self, query: &str) -> ParsedQuery;
}

const LANGUAGES: &[&str] = &[
    "rust",
    "python",
    "go",
    "typescript",
    "javascript",
    "java",
    "c++",
];

const ROLES: &[&str] = &[
    "engineer",
    "developer",
    "researcher",
    "architect",
    "lead",
    "manager",
];

const STOP_WORDS: &[&str] = &[
    "find", "me", "a", "an", "the", "is", "are", "in", "on", "at", "for", "with", "of", "and",
    "or", "but", "cracked",
];

/// Network-free query parser: first known language, first known role, and
/// the remaining non-stop-word tokens as keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicInterpreter;

impl HeuristicInterpreter {
    #[must_use]
    pub fn parse_query(query: &str) -> ParsedQuery {
        let lowered = query.to_lowercase();

        let language = LANGUAGES
            .iter()
            .find(|lang| lowered.contains(**lang))
            .map(|lang| (*lang).to_string());

        let role = ROLES
            .iter()
            .find(|role| lowered.contains(**role))
            .map(|role| (*role).to_string());

        let keywords = query
            .split_whitespace()
            .filter(|word| {
                let word = word.to_lowercase();
                !LANGUAGES.contains(&word.as_str())
                    && !ROLES.contains(&word.as_str())
                    && !STOP_WORDS.contains(&word.as_str())
            })
            .map(str::to_string)
            .collect();

        ParsedQuery {
            language,
            role,
            keywords,
        }
    }
}

#[async_trait]
impl QueryInterpreter for HeuristicInterpreter {
    async fn parse(&self, query: &str) -> ParsedQuery {
        Self::parse_query(query)
    }
}
