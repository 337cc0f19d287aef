//! Reltrack remote host access.
//!
//! The [`ReleaseHost`] trait is the seam between the collector and the
//! repository-hosting platform; [`GithubClient`] is the GitHub REST
//! implementation. All methods return already-parsed data - the collector
//! never sees HTTP details, only the one distinguished
//! [`GithubError::RateLimited`] signal that aborts a batch.

#![warn(missing_docs)]

mod client;

pub use client::GithubClient;

use async_trait::async_trait;
use reltrack_core::{DraftRelease, ReleaseIssue, ReleasePr};

/// Error type for remote host operations.
pub type Result<T> = std::result::Result<T, GithubError>;

/// Errors raised by the remote host client.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    /// API rate limit exhausted - fatal to the remaining batch
    #[error("rate limit exhausted after {calls} API calls")]
    RateLimited {
        /// Calls issued before exhaustion
        calls: u64,
    },

    /// Transport or status failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response payload could not be decoded
    #[error("payload decode error: {0}")]
    Decode(String),
}

impl GithubError {
    /// Whether this error must abort the remaining batch.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GithubError::RateLimited { .. })
    }
}

/// Remote repository-hosting platform operations needed by the collector.
///
/// Implementations fetch fresh data each call; nothing is cached across a
/// pass. Branch listing order must be preserved - the snapshot matcher
/// takes the first match in input order.
#[async_trait]
pub trait ReleaseHost: Send + Sync {
    /// File content at `path` on `reference`, `None` when the file does
    /// not exist.
    async fn file_content(&self, repo: &str, path: &str, reference: &str)
        -> Result<Option<String>>;

    /// Whether a git tag exists in the repository.
    async fn tag_exists(&self, repo: &str, tag: &str) -> Result<bool>;

    /// Branch names, optionally filtered by prefix, in listing order.
    async fn list_branches(&self, repo: &str, prefix: &str) -> Result<Vec<String>>;

    /// All draft releases of the repository.
    async fn draft_releases(&self, repo: &str) -> Result<Vec<DraftRelease>>;

    /// The open release-tracking issue, if any.
    async fn find_release_issue(&self, repo: &str) -> Result<Option<ReleaseIssue>>;

    /// The pull request targeting `base_branch`, if any.
    async fn find_release_pr(&self, repo: &str, base_branch: &str) -> Result<Option<ReleasePr>>;

    /// Remote calls issued so far by this host instance.
    fn api_calls(&self) -> u64;
}
