use async_trait::async_trait;
use github_verifier::error::{Result, VerifierError};
use github_verifier::types::{parse_repositories, parse_user, AuthenticatedUser, Repository, Stargazer};
use github_verifier::verify::StargazerLookup;
use std::collections::HashMap;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const USER_JSON: &str = r#"{"id": 1001, "type": "User", "login": "octocat"}"#;

/// Canned stargazer lists keyed by `stargazers_url`.
#[derive(Default)]
pub struct InMemoryStargazers {
    by_url: HashMap<String, Vec<Stargazer>>,
}

impl InMemoryStargazers {
    pub fn with(mut self, url: &str, ids: &[u64]) -> Self {
        let stargazers = ids
            .iter()
            .map(|id| Stargazer { id: *id, login: format!("user{}", id) })
            .collect();
        self.by_url.insert(url.to_string(), stargazers);
        self
    }
}

#[async_trait]
impl StargazerLookup for InMemoryStargazers {
    async fn stargazers(&self, repo: &Repository) -> Result<Vec<Stargazer>> {
        self.by_url
            .get(&repo.stargazers_url)
            .cloned()
            .ok_or_else(|| VerifierError::Fetch(format!("no stargazers for {}", repo.stargazers_url)))
    }
}

pub fn user() -> AuthenticatedUser {
    parse_user(USER_JSON).expect("fixture user should parse")
}

pub fn stargazers_url(name: &str) -> String {
    format!("https://api.github.com/repos/{}/stargazers", name)
}

/// Builds a `GET /user/repos` style payload.
pub fn repo_json(name: &str, owner_id: u64, fork: bool, forks: u32, stars: u32) -> serde_json::Value {
    serde_json::json!({
        "full_name": name,
        "owner": { "id": owner_id, "type": "User", "login": "someone" },
        "fork": fork,
        "forks_count": forks,
        "stargazers_count": stars,
        "stargazers_url": stargazers_url(name),
        "private": false
    })
}

pub fn repos(entries: Vec<serde_json::Value>) -> Vec<Repository> {
    let json = serde_json::Value::Array(entries).to_string();
    parse_repositories(&json).expect("fixture repositories should parse")
}

/// Answers a single HTTP request on a local port with a canned response and
/// returns the base URL to point a client at.
pub async fn serve_once(status: &str, headers: &[(&str, &str)], body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no local address");

    let mut response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        status,
        body.len()
    );
    for (name, value) in headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str("\r\n");
    response.push_str(body);

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        // GET requests carry no body; the blank line ends the request
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    request.extend_from_slice(&buf[..n]);
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
            }
        }

        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{}", addr)
}
