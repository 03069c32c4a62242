use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "github-verifier")]
#[command(about = "GitHub Verifier - Checks fork and star activity of a GitHub account")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub token of the account to verify
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Timeout for each GitHub request, in seconds
    #[arg(long, env = "GITHUB_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Read the authenticated user from a JSON file instead of the API
    #[arg(long, requires = "repos_file")]
    pub user_file: Option<PathBuf>,

    /// Read the repository list from a JSON file instead of the API
    #[arg(long, requires = "user_file")]
    pub repos_file: Option<PathBuf>,

    /// Fail when a stargazer lookup fails instead of skipping the repository
    #[arg(long)]
    pub strict: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}
