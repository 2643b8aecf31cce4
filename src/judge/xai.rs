//! xAI chat-completions client.
//!
//! Implements both consumed AI contracts: [`DeveloperJudge`] (profile
//! rating) and [`QueryInterpreter`] (free-text query parsing). Model output
//! is requested as bare JSON but extraction tolerates markdown code fences.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::JudgeConfig;
use crate::error::{CrakdError, Result};
use crate::judge::{DeveloperJudge, JudgeVerdict};
use crate::models::Developer;
use crate::query::{ParsedQuery, QueryInterpreter};

pub struct XaiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f64,
}

impl std::fmt::Debug for XaiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XaiClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct RatingResponse {
    cracked_score: f64,
    reasoning: String,
}

impl XaiClient {
    pub fn from_config(config: &JudgeConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| CrakdError::Config(format!("judge http client: {err}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    async fn chat_completion(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": [{"role": "user", "content": prompt}],
                "temperature": self.temperature,
            }))
            .send()
            .await?
            .error_for_status()?;

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CrakdError::JudgeResponse("no choices in completion".to_string()))?;
        Ok(content)
    }

    async fn rate_developer(&self, developer: &Developer, query: &str) -> Result<RatingResponse> {
        let profile_json = serde_json::to_string_pretty(developer)?;
        let prompt = rating_prompt(query, &profile_json);

        let content = self.chat_completion(&prompt).await?;
        let rating: RatingResponse = serde_json::from_str(extract_json(&content))
            .map_err(|err| CrakdError::JudgeResponse(format!("rating not valid JSON: {err}")))?;
        Ok(rating)
    }
}

#[async_trait]
impl DeveloperJudge for XaiClient {
    async fn judge(&self, developer: &Developer, query: &str) -> JudgeVerdict {
        match self.rate_developer(developer, query).await {
            Ok(rating) => JudgeVerdict::Scored {
                score: rating.cracked_score,
                reasoning: rating.reasoning,
            },
            Err(err) => {
                tracing::warn!(
                    username = %developer.username,
                    error = %err,
                    "judge call failed"
                );
                JudgeVerdict::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl QueryInterpreter for XaiClient {
    async fn parse(&self, query: &str) -> ParsedQuery {
        let prompt = parse_prompt(query);
        let parsed = match self.chat_completion(&prompt).await {
            Ok(content) => serde_json::from_str::<ParsedQuery>(extract_json(&content))
                .map_err(|err| CrakdError::JudgeResponse(format!("parse not valid JSON: {err}"))),
            Err(err) => Err(err),
        };

        match parsed {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(error = %err, "AI query parse failed, falling back to keywords");
                ParsedQuery::keywords_only(query)
            }
        }
    }
}

fn rating_prompt(query: &str, profile_json: &str) -> String {
    format!(
        r#"As an expert AI talent scout for software engineers, your task is to evaluate a developer's profile based on the provided data. The user is searching for: "{query}".

Analyze the following developer data:
{profile_json}

Based on the data, provide a "cracked_score" from 1 to 100, where 100 is a perfect match for a "cracked" developer according to the user's query. Also, provide a short "reasoning" for your score.

A "cracked" developer is someone who is exceptionally skilled, innovative, and productive. Consider factors like code quality, project complexity, innovation, and community impact.

Return ONLY a JSON object with two keys: "cracked_score" and "reasoning". No other text."#
    )
}

fn parse_prompt(query: &str) -> String {
    format!(
        r#"You are an intelligent query parser for a developer search engine.
Your task is to analyze the user's query and extract the primary programming language, the developer's role, and any other relevant keywords.

User Query: "{query}"

Analyze the query and return a JSON object with three keys:
1. "language": The primary programming language mentioned (e.g., "python", "rust", "typescript"). If none, use null.
2. "role": The primary job role mentioned (e.g., "engineer", "developer", "architect"). If none, use null.
3. "keywords": A list of any other important technical keywords or phrases from the query (e.g., ["react native", "machine learning"]). Do not include conversational filler like "find me" or "gimme".

Example 1:
Query: "find me a cracked rust engineer"
Output: {{"language": "rust", "role": "engineer", "keywords": []}}

Example 2:
Query: "gimme react native devs"
Output: {{"language": "react", "role": "developer", "keywords": ["react native"]}}

Example 3:
Query: "senior python developer with machine learning experience"
Output: {{"language": "python", "role": "developer", "keywords": ["senior", "machine learning"]}}

Return ONLY the JSON object. No other text."#
    )
}

/// Trim the raw model output down to the JSON object it contains.
///
/// Models occasionally wrap the object in markdown fences or lead with prose;
/// the slice between the first and last brace is what gets parsed.
fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start <= end => &trimmed[start..=end],
        _ => trimmed,
    }
}
