//! GitHub REST client.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reltrack_core::{DraftRelease, ReleaseIssue, ReleasePr};
use reqwest::{Client, ClientBuilder, Response};
use tracing::{debug, warn};

use crate::{GithubError, ReleaseHost, Result};

const API_ROOT: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const PAGE_SIZE: usize = 100;

/// Threshold below which remaining-quota warnings are logged.
const RATE_LIMIT_LOW_WATER: u64 = 50;

/// Thin REST client for the GitHub operations the collector needs.
///
/// Authentication is a straight token pass-through; reads `GITHUB_TOKEN`
/// when no token is given. Unauthenticated use works against public
/// repositories with a much smaller rate budget.
pub struct GithubClient {
    client: Client,
    org: String,
    token: Option<String>,
    calls: AtomicU64,
}

impl GithubClient {
    /// Create a client for an organization, reading `GITHUB_TOKEN` from
    /// the environment if set.
    pub fn new(org: impl Into<String>) -> Self {
        let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        Self::with_token(org, token)
    }

    /// Create a client with an explicit token (or none).
    pub fn with_token(org: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(std::time::Duration::from_secs(30))
                .user_agent("reltrack")
                .build()
                .unwrap_or_default(),
            org: org.into(),
            token,
            calls: AtomicU64::new(0),
        }
    }

    /// Issue a GET against an API path, monitoring the rate limit.
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{API_ROOT}{path}");
        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .query(query);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = request.send().await?;
        let calls = self.calls.fetch_add(1, Ordering::Relaxed) + 1;

        if let Some(remaining) = rate_limit_remaining(&response) {
            if remaining == 0 {
                return Err(GithubError::RateLimited { calls });
            }
            if remaining < RATE_LIMIT_LOW_WATER {
                warn!(remaining, "GitHub API rate limit low");
            }
        }

        Ok(response)
    }
}

fn rate_limit_remaining(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("X-RateLimit-Remaining")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

#[async_trait]
impl ReleaseHost for GithubClient {
    async fn file_content(
        &self,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Option<String>> {
        let response = self
            .get(
                &format!("/repos/{}/{repo}/contents/{path}", self.org),
                &[("ref", reference)],
            )
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status()?;

        #[derive(serde::Deserialize)]
        struct Contents {
            #[serde(default)]
            content: Option<String>,
            #[serde(default)]
            encoding: Option<String>,
        }

        let contents: Contents = response.json().await?;
        match contents {
            Contents {
                content: Some(raw),
                encoding: Some(encoding),
            } if encoding == "base64" => {
                // The contents API wraps base64 payloads at 60 columns
                let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
                let bytes = BASE64
                    .decode(compact)
                    .map_err(|e| GithubError::Decode(format!("{repo}/{path}: {e}")))?;
                let text = String::from_utf8(bytes)
                    .map_err(|e| GithubError::Decode(format!("{repo}/{path}: {e}")))?;
                Ok(Some(text))
            }
            Contents { content, .. } => Ok(content),
        }
    }

    async fn tag_exists(&self, repo: &str, tag: &str) -> Result<bool> {
        let response = self
            .get(&format!("/repos/{}/{repo}/git/ref/tags/{tag}", self.org), &[])
            .await?;
        Ok(response.status() == reqwest::StatusCode::OK)
    }

    async fn list_branches(&self, repo: &str, prefix: &str) -> Result<Vec<String>> {
        #[derive(serde::Deserialize)]
        struct Branch {
            name: String,
        }

        let mut branches = Vec::new();
        let mut page = 1usize;
        loop {
            let page_param = page.to_string();
            let per_page = PAGE_SIZE.to_string();
            let response = self
                .get(
                    &format!("/repos/{}/{repo}/branches", self.org),
                    &[("per_page", per_page.as_str()), ("page", page_param.as_str())],
                )
                .await?
                .error_for_status()?;

            let data: Vec<Branch> = response.json().await?;
            let fetched = data.len();
            for branch in data {
                if prefix.is_empty() || branch.name.starts_with(prefix) {
                    branches.push(branch.name);
                }
            }
            if fetched < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        debug!(repo, count = branches.len(), "listed branches");
        Ok(branches)
    }

    async fn draft_releases(&self, repo: &str) -> Result<Vec<DraftRelease>> {
        #[derive(serde::Deserialize)]
        struct Release {
            #[serde(default)]
            name: Option<String>,
            #[serde(default)]
            tag_name: Option<String>,
            #[serde(default)]
            html_url: Option<String>,
            #[serde(default)]
            draft: bool,
        }

        let response = self
            .get(
                &format!("/repos/{}/{repo}/releases", self.org),
                &[("per_page", "30")],
            )
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let releases: Vec<Release> = response.error_for_status()?.json().await?;

        Ok(releases
            .into_iter()
            .filter(|r| r.draft)
            .map(|r| DraftRelease {
                name: r.name,
                tag_name: r.tag_name,
                html_url: r.html_url,
            })
            .collect())
    }

    async fn find_release_issue(&self, repo: &str) -> Result<Option<ReleaseIssue>> {
        #[derive(serde::Deserialize)]
        struct Issue {
            number: u64,
            html_url: String,
        }

        let response = self
            .get(
                &format!("/repos/{}/{repo}/issues", self.org),
                &[
                    ("labels", "release-issue"),
                    ("state", "open"),
                    ("per_page", "1"),
                ],
            )
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let issues: Vec<Issue> = response.error_for_status()?.json().await?;

        Ok(issues.into_iter().next().map(|i| ReleaseIssue {
            number: i.number,
            url: i.html_url,
        }))
    }

    async fn find_release_pr(&self, repo: &str, base_branch: &str) -> Result<Option<ReleasePr>> {
        #[derive(serde::Deserialize)]
        struct Pull {
            number: u64,
            state: String,
            html_url: String,
        }

        let response = self
            .get(
                &format!("/repos/{}/{repo}/pulls", self.org),
                &[("base", base_branch), ("state", "all"), ("per_page", "1")],
            )
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let pulls: Vec<Pull> = response.error_for_status()?.json().await?;

        Ok(pulls.into_iter().next().map(|p| ReleasePr {
            number: p.number,
            state: p.state,
            url: p.html_url,
        }))
    }

    fn api_calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}
