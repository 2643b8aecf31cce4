//! GitHub data source: finds candidate developers for a free-text query.
//!
//! One GraphQL search fetches each matching user together with their five
//! most-starred repositories and contribution totals. Failures here are not
//! ranking failures: any transport or API error is logged and reported as an
//! empty candidate list.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use crate::config::GitHubConfig;
use crate::error::{CrakdError, Result};
use crate::models::{Developer, Repository};
use crate::query::{ParsedQuery, QueryInterpreter};

const USER_AGENT: &str = "crakd-cli";

const SEARCH_QUERY: &str = r"
query search($query_str: String!, $limit: Int!) {
  rateLimit {
    limit
    cost
    remaining
    resetAt
  }
  search(query: $query_str, type: USER, first: $limit) {
    nodes {
      ... on User {
        login
        name
        bio
        followers {
          totalCount
        }
        following {
          totalCount
        }
        repositories(first: 5, orderBy: {field: STARGAZERS, direction: DESC}) {
          totalCount
          nodes {
            name
            stargazerCount
            forkCount
            description
            primaryLanguage {
              name
            }
          }
        }
        contributionsCollection {
          contributionCalendar {
            totalContributions
          }
        }
      }
    }
  }
}
";

pub struct GitHubSearch {
    client: reqwest::Client,
    api_url: String,
    token: String,
    min_followers: u64,
    min_repos: u64,
    interpreter: Arc<dyn QueryInterpreter>,
}

impl std::fmt::Debug for GitHubSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubSearch")
            .field("api_url", &self.api_url)
            .field("min_followers", &self.min_followers)
            .field("min_repos", &self.min_repos)
            .finish_non_exhaustive()
    }
}

impl GitHubSearch {
    pub fn from_config(
        config: &GitHubConfig,
        interpreter: Arc<dyn QueryInterpreter>,
    ) -> Result<Self> {
        let token = config.require_token()?.to_string();
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| CrakdError::Config(format!("github http client: {err}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            token,
            min_followers: config.min_followers,
            min_repos: config.min_repos,
            interpreter,
        })
    }

    /// Find candidate developers for a free-text query.
    ///
    /// May return fewer than `limit` results, or an empty list when nothing
    /// matched or the API call failed; search failures never propagate as
    /// ranking errors.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<Developer> {
        let parsed = self.interpreter.parse(query).await;
        let search_str = self.build_search_query(&parsed);
        tracing::info!(search = %search_str, "executing GitHub user search");

        match self.execute_search(&search_str, limit).await {
            Ok(developers) => developers,
            Err(err) => {
                tracing::warn!(query = %query, error = %err, "GitHub search failed");
                if err.to_string().to_lowercase().contains("rate limit") {
                    tracing::warn!(
                        "you may have hit the GitHub API rate limit; check your token and usage"
                    );
                }
                Vec::new()
            }
        }
    }

    fn build_search_query(&self, parsed: &ParsedQuery) -> String {
        let mut parts = vec![
            "type:user".to_string(),
            format!("followers:>{}", self.min_followers),
            format!("repos:>{}", self.min_repos),
        ];

        if let Some(language) = &parsed.language {
            parts.push(format!("language:{language}"));
        }

        let terms: Vec<&str> = parsed
            .keywords
            .iter()
            .map(String::as_str)
            .chain(parsed.role.as_deref())
            .filter(|term| !term.trim().is_empty())
            .collect();
        if !terms.is_empty() {
            parts.push(terms.join(" "));
        }

        parts.join(" ")
    }

    async fn execute_search(&self, search_str: &str, limit: usize) -> Result<Vec<Developer>> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.token)
            .json(&json!({
                "query": SEARCH_QUERY,
                "variables": { "query_str": search_str, "limit": limit },
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: GraphQlResponse = response.json().await?;

        if let Some(errors) = body.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(CrakdError::GitHubSearch(messages.join("; ")));
        }

        let data = body
            .data
            .ok_or_else(|| CrakdError::GitHubSearch("empty GraphQL response".to_string()))?;

        if let Some(rate) = &data.rate_limit {
            tracing::debug!(
                limit = rate.limit,
                cost = rate.cost,
                remaining = rate.remaining,
                reset_at = %rate.reset_at,
                "GitHub API rate limit"
            );
        }

        let developers = data
            .search
            .nodes
            .into_iter()
            .flatten()
            .filter_map(UserNode::into_developer)
            .collect();
        Ok(developers)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<SearchData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    #[serde(rename = "rateLimit")]
    rate_limit: Option<RateLimit>,
    search: SearchNodes,
}

#[derive(Debug, Deserialize)]
struct RateLimit {
    limit: u64,
    cost: u64,
    remaining: u64,
    #[serde(rename = "resetAt")]
    reset_at: String,
}

#[derive(Debug, Deserialize)]
struct SearchNodes {
    #[serde(default)]
    nodes: Vec<Option<UserNode>>,
}

#[derive(Debug, Deserialize)]
struct UserNode {
    login: Option<String>,
    name: Option<String>,
    bio: Option<String>,
    followers: Option<CountField>,
    following: Option<CountField>,
    repositories: Option<RepositoryConnection>,
    #[serde(rename = "contributionsCollection")]
    contributions: Option<ContributionsCollection>,
}

#[derive(Debug, Deserialize)]
struct CountField {
    #[serde(rename = "totalCount", default)]
    total_count: u64,
}

#[derive(Debug, Deserialize)]
struct RepositoryConnection {
    #[serde(rename = "totalCount", default)]
    total_count: u64,
    #[serde(default)]
    nodes: Vec<Option<RepoNode>>,
}

#[derive(Debug, Deserialize)]
struct RepoNode {
    name: Option<String>,
    #[serde(rename = "stargazerCount", default)]
    stargazer_count: u64,
    #[serde(rename = "forkCount", default)]
    fork_count: u64,
    description: Option<String>,
    #[serde(rename = "primaryLanguage")]
    primary_language: Option<LanguageField>,
}

#[derive(Debug, Deserialize)]
struct LanguageField {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContributionsCollection {
    #[serde(rename = "contributionCalendar")]
    calendar: Option<ContributionCalendar>,
}

#[derive(Debug, Deserialize)]
struct ContributionCalendar {
    #[serde(rename = "totalContributions", default)]
    total_contributions: u64,
}

impl UserNode {
    /// Map a search node to a profile record; nodes without a login (search
    /// matches that are not users) are skipped.
    fn into_developer(self) -> Option<Developer> {
        let username = self.login?;

        let top_repositories = self
            .repositories
            .as_ref()
            .map(|connection| {
                connection
                    .nodes
                    .iter()
                    .flatten()
                    .filter_map(|repo| {
                        Some(Repository {
                            name: repo.name.clone()?,
                            stargazers_count: repo.stargazer_count,
                            forks_count: repo.fork_count,
                            description: repo.description.clone(),
                            language: repo
                                .primary_language
                                .as_ref()
                                .and_then(|lang| lang.name.clone()),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(Developer {
            username,
            name: self.name,
            bio: self.bio,
            followers: self.followers.map(|f| f.total_count).unwrap_or_default(),
            following: self.following.map(|f| f.total_count).unwrap_or_default(),
            public_repos: self
                .repositories
                .map(|r| r.total_count)
                .unwrap_or_default(),
            total_contributions: self
                .contributions
                .and_then(|c| c.calendar)
                .map(|c| c.total_contributions)
                .unwrap_or_default(),
            top_repositories,
        })
    }
}
