use reqwest::{header, Client};
use serde_json::json;

use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::models::graphql::{AnalyticsQueryResponse, AnalyticsUser, GraphQLResponse};
use crate::models::{GitHubUser, Repository};

const REST_ENDPOINT: &str = "https://api.github.com";
const GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

/// One combined query so a profile fetch costs a single GraphQL round trip:
/// contribution calendar plus per-type totals, the first 100 public owned
/// repositories with their top-10 languages by size, and up to 6 pinned
/// repositories.
const ANALYTICS_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks { contributionDays { date contributionCount } }
      }
      totalCommitContributions
      totalPullRequestContributions
      totalPullRequestReviewContributions
      totalIssueContributions
      restrictedContributionsCount
    }
    repositories(first: 100, ownerAffiliations: OWNER, privacy: PUBLIC) {
      nodes {
        name
        languages(first: 10, orderBy: { field: SIZE, direction: DESC }) {
          edges { size node { name color } }
        }
      }
    }
    pinnedItems(first: 6, types: REPOSITORY) {
      nodes {
        ... on Repository {
          name
          description
          url
          stargazerCount
          primaryLanguage { name color }
          createdAt
          updatedAt
        }
      }
    }
  }
}
"#;

pub struct GitHubClient {
    client: Client,
    has_token: bool,
    base_url: String,
    graphql_url: String,
    max_repo_pages: u32,
}

impl GitHubClient {
    pub fn new(token: Option<&str>, max_repo_pages: u32) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitduel/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            has_token: token.is_some(),
            base_url: REST_ENDPOINT.to_string(),
            graphql_url: GRAPHQL_ENDPOINT.to_string(),
            max_repo_pages,
        })
    }

    pub async fn get_user(&self, handle: &str) -> Result<GitHubUser> {
        let url = format!("{}/users/{}", self.base_url, handle);
        tracing::info!("Fetching user: {}", handle);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UpstreamApi { status, body });
        }

        Ok(response.json().await?)
    }

    /// Owned repositories, newest-updated first, capped at
    /// `max_repo_pages` pages of 100.
    pub async fn get_user_repos(&self, handle: &str) -> Result<Vec<Repository>> {
        let url = format!(
            "{}/users/{}/repos?type=owner&sort=updated",
            self.base_url, handle
        );
        let paginator = Paginator::new(&self.client);
        tracing::info!("Fetching repositories for: {}", handle);
        paginator.fetch_pages(&url, 100, self.max_repo_pages).await
    }

    /// Runs the combined analytics query. Returns `Ok(None)` when no token
    /// is configured (the GraphQL interface requires authentication), so
    /// the rest of the pipeline degrades instead of failing.
    pub async fn fetch_analytics(&self, handle: &str) -> Result<Option<AnalyticsUser>> {
        if !self.has_token {
            tracing::debug!("No token configured, skipping analytics for {}", handle);
            return Ok(None);
        }

        tracing::info!("Fetching contribution analytics for: {}", handle);
        let body = json!({
            "query": ANALYTICS_QUERY,
            "variables": { "login": handle },
        });

        let response = self.client.post(&self.graphql_url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UpstreamApi { status, body });
        }

        let result: GraphQLResponse<AnalyticsQueryResponse> = response.json().await?;

        if let Some(errors) = result.errors {
            if !errors.is_empty() {
                let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
                return Err(Error::UpstreamApi {
                    status: 200,
                    body: messages.join("; "),
                });
            }
        }

        Ok(result.data.and_then(|d| d.user))
    }
}
