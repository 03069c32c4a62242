pub mod forks;
pub mod stars;

pub use forks::verify_forks;
pub use stars::verify_stars;

use crate::error::Result;
use crate::models::VerificationSummary;
use crate::types::{AuthenticatedUser, Repository, Stargazer};
use async_trait::async_trait;

/// Source of a repository's stargazers.
#[async_trait]
pub trait StargazerLookup: Send + Sync {
    async fn stargazers(&self, repo: &Repository) -> Result<Vec<Stargazer>>;
}

/// What the star check does when a stargazer lookup fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchFailurePolicy {
    /// Treat the repository as non-qualifying and keep scanning.
    #[default]
    Skip,
    /// Abort with the fetch error.
    Fail,
}

/// Runs both checks against the same inputs.
pub async fn verify_all<L: StargazerLookup + ?Sized>(
    user: &AuthenticatedUser,
    repos: &[Repository],
    lookup: &L,
    policy: FetchFailurePolicy,
) -> Result<VerificationSummary> {
    let forks = verify_forks(user, repos)?;
    let stars = verify_stars(user, repos, lookup, policy).await?;

    Ok(VerificationSummary {
        user_id: user.id,
        forks,
        stars,
    })
}
