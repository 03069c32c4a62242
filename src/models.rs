use serde::{Deserialize, Serialize};

/// Outcome of the fork check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forks_count: Option<u32>,
}

impl ForkVerification {
    pub fn matched(owner_id: u64, forks_count: u32) -> Self {
        Self {
            owner_id: Some(owner_id),
            forks_count: Some(forks_count),
        }
    }

    /// Default returned when no repository qualifies.
    pub fn none_for(user_id: u64) -> Self {
        Self::matched(user_id, 0)
    }

    pub fn is_verified(&self) -> bool {
        self.forks_count.unwrap_or(0) >= 1
    }
}

/// Outcome of the star check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stargazers_count: Option<u32>,
}

impl StarVerification {
    pub fn matched(owner_id: u64, stargazers_count: u32) -> Self {
        Self {
            owner_id: Some(owner_id),
            stargazers_count: Some(stargazers_count),
        }
    }

    /// Default returned when no repository qualifies.
    pub fn none_for(user_id: u64) -> Self {
        Self::matched(user_id, 0)
    }

    pub fn is_verified(&self) -> bool {
        self.stargazers_count.unwrap_or(0) >= 1
    }
}

/// Both checks for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub user_id: u64,
    pub forks: ForkVerification,
    pub stars: StarVerification,
}

impl VerificationSummary {
    pub fn is_fork_verified(&self) -> bool {
        self.forks.is_verified()
    }

    pub fn is_star_verified(&self) -> bool {
        self.stars.is_verified()
    }
}

/// Rate limit state reported by the last GitHub response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitState {
    pub remaining: u32,
    pub limit: u32,
    pub reset_time: chrono::DateTime<chrono::Utc>,
    pub is_limited: bool,
}

impl Default for RateLimitState {
    fn default() -> Self {
        Self {
            remaining: 5000,
            limit: 5000,
            reset_time: chrono::Utc::now() + chrono::Duration::hours(1),
            is_limited: false,
        }
    }
}
