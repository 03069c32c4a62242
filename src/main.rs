use anyhow::Context;
use clap::Parser;
use colored::*;
use github_verifier::cli::Cli;
use github_verifier::github::{ClientConfig, GitHubClient};
use github_verifier::models::VerificationSummary;
use github_verifier::types::{parse_repositories, parse_user, AuthenticatedUser, Repository};
use github_verifier::verify::{verify_all, FetchFailurePolicy};
use std::path::Path;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig {
        api_url: cli.api_url.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
        ..Default::default()
    };
    let client = GitHubClient::new(cli.token.clone(), config)
        .context("Failed to create GitHub client")?;

    let (user, repos) = load_inputs(&cli, &client).await?;
    info!(user_id = user.id, repos = repos.len(), "Loaded verification inputs");

    let policy = if cli.strict { FetchFailurePolicy::Fail } else { FetchFailurePolicy::Skip };
    let summary = verify_all(&user, &repos, &client, policy)
        .await
        .context("Verification failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&user, &summary);
    }

    Ok(())
}

async fn load_inputs(
    cli: &Cli,
    client: &GitHubClient,
) -> anyhow::Result<(AuthenticatedUser, Vec<Repository>)> {
    match (&cli.user_file, &cli.repos_file) {
        (Some(user_file), Some(repos_file)) => {
            let user = parse_user(&read_file(user_file)?)
                .with_context(|| format!("Invalid user record in {}", user_file.display()))?;
            let repos = parse_repositories(&read_file(repos_file)?)
                .with_context(|| format!("Invalid repository list in {}", repos_file.display()))?;
            Ok((user, repos))
        }
        _ => {
            if cli.token.is_none() {
                anyhow::bail!("GITHUB_TOKEN is required unless --user-file and --repos-file are given");
            }
            let (user, repos) = futures::try_join!(
                client.get_authenticated_user(),
                client.list_user_repositories()
            )
            .context("Failed to fetch account data from GitHub")?;
            Ok((user, repos))
        }
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_summary(user: &AuthenticatedUser, summary: &VerificationSummary) {
    let name = user.login.clone().unwrap_or_else(|| user.id.to_string());
    println!("{}", format!("GitHub verification for {}", name).bold().green());
    println!("{}", "=".repeat(50).dimmed());

    let status = |verified: bool| {
        if verified { "PASS".green().bold() } else { "FAIL".red().bold() }
    };

    println!(
        "Forks: {} (owner {}, {} forks)",
        status(summary.is_fork_verified()),
        summary.forks.owner_id.unwrap_or(user.id),
        summary.forks.forks_count.unwrap_or(0)
    );
    println!(
        "Stars: {} (owner {}, {} stargazers)",
        status(summary.is_star_verified()),
        summary.stars.owner_id.unwrap_or(user.id),
        summary.stars.stargazers_count.unwrap_or(0)
    );
}
