use crate::error::{Result, VerifierError};
use crate::models::RateLimitState;
use crate::types::{parse_repositories, parse_user, AuthenticatedUser, Repository, Stargazer};
use crate::verify::StargazerLookup;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
const PER_PAGE: u32 = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

pub struct GitHubClient {
    client: Client,
    token: Option<String>,
    api_url: Url,
}

impl GitHubClient {
    pub fn new(token: Option<String>, config: ClientConfig) -> Result<Self> {
        let mut api_url = Url::parse(&config.api_url)
            .map_err(|e| VerifierError::InvalidUrl(format!("{}: {}", config.api_url, e)))?;
        // Url::join replaces the last segment unless the base ends in '/'
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(GitHubClient { client, token, api_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path)
            .map_err(|e| VerifierError::InvalidUrl(format!("{}{}: {}", self.api_url, path, e)))
    }

    /// Single attempt; retries and rate-limit waits are left to the caller.
    async fn make_request(&self, url: Url) -> Result<Response> {
        let mut request = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request.send().await?;
        let rate_limit = self.get_rate_limit_state(&response);
        debug!(
            url = %url,
            status = %response.status(),
            remaining = rate_limit.remaining,
            limit = rate_limit.limit,
            "GitHub response"
        );

        match response.status() {
            status if status.is_success() => Ok(response),
            reqwest::StatusCode::NOT_FOUND => {
                Err(VerifierError::NotFound(format!("Resource not found: {}", url)))
            }
            reqwest::StatusCode::UNAUTHORIZED => {
                Err(VerifierError::AuthError(format!("Bad or missing credentials for {}", url)))
            }
            reqwest::StatusCode::FORBIDDEN if rate_limit.is_limited => {
                Err(VerifierError::RateLimitExceeded(
                    format!("API rate limit exceeded. Reset at: {}", rate_limit.reset_time)
                ))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(VerifierError::ApiError(
                    format!("API request failed with status {}: {}", status, error_text)
                ))
            }
        }
    }

    /// Get current rate limit state from a response
    pub fn get_rate_limit_state(&self, response: &Response) -> RateLimitState {
        let headers = response.headers();
        let fallback = RateLimitState::default();

        let remaining = headers
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        let limit = headers
            .get("X-RateLimit-Limit")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(fallback.limit);

        let reset = headers
            .get("X-RateLimit-Reset")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok())
            .map(|timestamp| DateTime::from_timestamp(timestamp, 0).unwrap_or_else(Utc::now))
            .unwrap_or(fallback.reset_time);

        RateLimitState {
            remaining: remaining.unwrap_or(limit),
            limit,
            reset_time: reset,
            is_limited: remaining == Some(0),
        }
    }

    pub async fn get_authenticated_user(&self) -> Result<AuthenticatedUser> {
        let url = self.endpoint("user")?;
        let response = self.make_request(url).await?;
        parse_user(&response.text().await?)
    }

    /// First page of repositories owned by the authenticated user.
    pub async fn list_user_repositories(&self) -> Result<Vec<Repository>> {
        let mut url = self.endpoint("user/repos")?;
        url.query_pairs_mut()
            .append_pair("type", "owner")
            .append_pair("per_page", &PER_PAGE.to_string());

        let response = self.make_request(url).await?;
        parse_repositories(&response.text().await?)
    }

    /// Fetch the first page of stargazers behind a repository's `stargazers_url`.
    pub async fn list_stargazers(&self, stargazers_url: &str) -> Result<Vec<Stargazer>> {
        let mut url = Url::parse(stargazers_url)
            .map_err(|e| VerifierError::InvalidUrl(format!("{}: {}", stargazers_url, e)))?;
        url.query_pairs_mut().append_pair("per_page", &PER_PAGE.to_string());

        let response = self.make_request(url).await?;
        let users: Vec<Stargazer> = response.json().await?;
        Ok(users)
    }
}

#[async_trait]
impl StargazerLookup for GitHubClient {
    async fn stargazers(&self, repo: &Repository) -> Result<Vec<Stargazer>> {
        self.list_stargazers(&repo.stargazers_url)
            .await
            .map_err(|e| VerifierError::Fetch(format!("{}: {}", repo.display_name(), e)))
    }
}
