use crate::error::{Result, VerifierError};
use serde::{Deserialize, Serialize};
use url::Url;

// GitHub API response structures

/// The account behind the token, as returned by `GET /user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: u64,
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub login: Option<String>,
}

impl AuthenticatedUser {
    pub fn validate(&self) -> Result<()> {
        if self.id == 0 {
            return Err(VerifierError::Validation("user id must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoOwner {
    pub id: u64,
    #[serde(rename = "type")]
    pub account_type: String,
}

/// One entry of `GET /user/repos`, reduced to the fields verification reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub full_name: Option<String>,
    pub owner: RepoOwner,
    pub fork: bool,
    pub forks_count: u32,
    pub stargazers_count: u32,
    pub stargazers_url: String,
}

impl Repository {
    /// Name used in logs and error messages.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("<unnamed>")
    }

    pub fn is_owned_by(&self, user: &AuthenticatedUser) -> bool {
        self.owner.id == user.id
    }

    pub fn validate(&self) -> Result<()> {
        let parsed = Url::parse(&self.stargazers_url).map_err(|e| {
            VerifierError::Validation(format!(
                "repository {} has invalid stargazers_url {:?}: {}",
                self.display_name(),
                self.stargazers_url,
                e
            ))
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(VerifierError::Validation(format!(
                "repository {} has unsupported stargazers_url scheme: {}",
                self.display_name(),
                scheme
            ))),
        }
    }
}

/// One entry of `GET /repos/{owner}/{repo}/stargazers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stargazer {
    pub id: u64,
    pub login: String,
}

/// Parses a raw `GET /user` payload.
pub fn parse_user(json: &str) -> Result<AuthenticatedUser> {
    let user: AuthenticatedUser = serde_json::from_str(json)
        .map_err(|e| VerifierError::Validation(format!("malformed user record: {}", e)))?;
    user.validate()?;
    Ok(user)
}

/// Parses a raw `GET /user/repos` payload.
pub fn parse_repositories(json: &str) -> Result<Vec<Repository>> {
    let repos: Vec<Repository> = serde_json::from_str(json)
        .map_err(|e| VerifierError::Validation(format!("malformed repository list: {}", e)))?;
    for repo in &repos {
        repo.validate()?;
    }
    Ok(repos)
}
