use super::{FetchFailurePolicy, StargazerLookup};
use crate::error::Result;
use crate::models::StarVerification;
use crate::types::{AuthenticatedUser, Repository};
use tracing::{debug, warn};

/// Finds the first repository owned by `user` that someone other than the
/// owner has starred. A lone star is only trusted after looking up who gave it.
pub async fn verify_stars<L: StargazerLookup + ?Sized>(
    user: &AuthenticatedUser,
    repos: &[Repository],
    lookup: &L,
    policy: FetchFailurePolicy,
) -> Result<StarVerification> {
    user.validate()?;

    for repo in repos {
        repo.validate()?;
    }

    for repo in repos {
        if !repo.is_owned_by(user) {
            continue;
        }

        let qualifies = match repo.stargazers_count {
            0 => false,
            1 => starred_by_someone_else(repo, lookup, policy).await?,
            _ => true,
        };

        if qualifies {
            debug!(
                repo = repo.display_name(),
                owner_id = repo.owner.id,
                count = repo.stargazers_count,
                "star check matched"
            );
            return Ok(StarVerification::matched(repo.owner.id, repo.stargazers_count));
        }
    }

    Ok(StarVerification::none_for(user.id))
}

async fn starred_by_someone_else<L: StargazerLookup + ?Sized>(
    repo: &Repository,
    lookup: &L,
    policy: FetchFailurePolicy,
) -> Result<bool> {
    let stargazers = match lookup.stargazers(repo).await {
        Ok(stargazers) => stargazers,
        Err(e) if policy == FetchFailurePolicy::Skip => {
            warn!(repo = repo.display_name(), error = %e, "stargazer lookup failed, skipping");
            return Ok(false);
        }
        Err(e) => return Err(e),
    };

    // The listing can differ from stargazers_count if stars changed since the
    // repository list was fetched; an empty list does not qualify.
    Ok(stargazers.iter().any(|stargazer| stargazer.id != repo.owner.id))
}
