use crate::error::Result;
use crate::models::ForkVerification;
use crate::types::{AuthenticatedUser, Repository};
use tracing::debug;

/// Finds the first original repository owned by `user` that has been forked
/// at least once. Falls back to a zero count for `user` when none qualifies.
pub fn verify_forks(user: &AuthenticatedUser, repos: &[Repository]) -> Result<ForkVerification> {
    user.validate()?;

    for repo in repos {
        repo.validate()?;
    }

    for repo in repos {
        if repo.is_owned_by(user) && !repo.fork && repo.forks_count >= 1 {
            debug!(
                repo = repo.display_name(),
                owner_id = repo.owner.id,
                count = repo.forks_count,
                "fork check matched"
            );
            return Ok(ForkVerification::matched(repo.owner.id, repo.forks_count));
        }
    }

    Ok(ForkVerification::none_for(user.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VerifierError;
    use crate::types::RepoOwner;

    fn user(id: u64) -> AuthenticatedUser {
        AuthenticatedUser { id, account_type: "User".to_string(), login: None }
    }

    fn repo(owner_id: u64, fork: bool, forks_count: u32) -> Repository {
        Repository {
            full_name: Some(format!("owner{}/repo", owner_id)),
            owner: RepoOwner { id: owner_id, account_type: "User".to_string() },
            fork,
            forks_count,
            stargazers_count: 0,
            stargazers_url: format!("https://api.github.com/repos/owner{}/repo/stargazers", owner_id),
        }
    }

    #[test]
    fn test_empty_list_defaults_to_user() {
        let result = verify_forks(&user(7), &[]).unwrap();
        assert_eq!(result, ForkVerification::matched(7, 0));
        assert!(!result.is_verified());
    }

    #[test]
    fn test_single_forked_original() {
        let result = verify_forks(&user(7), &[repo(7, false, 3)]).unwrap();
        assert_eq!(result, ForkVerification::matched(7, 3));
        assert!(result.is_verified());
    }

    #[test]
    fn test_forked_repo_does_not_count() {
        let result = verify_forks(&user(7), &[repo(7, true, 12)]).unwrap();
        assert_eq!(result, ForkVerification::none_for(7));
    }

    #[test]
    fn test_other_owner_does_not_count() {
        let result = verify_forks(&user(7), &[repo(8, false, 12)]).unwrap();
        assert_eq!(result, ForkVerification::none_for(7));
    }

    #[test]
    fn test_first_match_survives_later_misses() {
        let repos = vec![repo(7, false, 0), repo(7, false, 2), repo(7, false, 9), repo(7, false, 0)];
        let result = verify_forks(&user(7), &repos).unwrap();
        assert_eq!(result, ForkVerification::matched(7, 2));
    }

    #[test]
    fn test_invalid_repository_is_rejected() {
        let mut bad = repo(7, false, 1);
        bad.stargazers_url = String::new();
        let err = verify_forks(&user(7), &[bad]).unwrap_err();
        assert!(matches!(err, VerifierError::Validation(_)));
    }

    #[test]
    fn test_validation_does_not_depend_on_order() {
        let mut bad = repo(8, false, 0);
        bad.stargazers_url = "stargazers".to_string();

        let before = verify_forks(&user(7), &[bad.clone(), repo(7, false, 2)]);
        let after = verify_forks(&user(7), &[repo(7, false, 2), bad]);

        assert!(matches!(before, Err(VerifierError::Validation(_))));
        assert!(matches!(after, Err(VerifierError::Validation(_))));
    }
}
