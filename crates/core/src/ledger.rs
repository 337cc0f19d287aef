//! Release ledger - the central file recording all known past releases.

use serde::{Deserialize, Serialize};

/// An API as recorded in a ledger release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseApi {
    /// API identifier
    #[serde(default)]
    pub api_name: String,

    /// Version published in the release
    #[serde(default)]
    pub api_version: Option<String>,
}

/// One past release recorded in the ledger.
///
/// Every field beyond the repository name is optional so that a partially
/// filled ledger row is still a valid input, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerRelease {
    /// Repository the release belongs to
    #[serde(default)]
    pub repository: String,

    /// Release tag
    #[serde(default)]
    pub release_tag: Option<String>,

    /// ISO-8601 release date
    #[serde(default)]
    pub release_date: Option<String>,

    /// Cycle (meta-release) label
    #[serde(default)]
    pub meta_release: Option<String>,

    /// Release type, e.g. "pre-release-alpha"
    #[serde(default)]
    pub release_type: Option<String>,

    /// Release page URL
    #[serde(default)]
    pub github_url: Option<String>,

    /// APIs contained in the release
    #[serde(default)]
    pub apis: Vec<ReleaseApi>,
}

/// A repository row in the ledger, with its published context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerRepository {
    /// Repository name
    #[serde(default)]
    pub repository: String,

    /// Repository web URL
    #[serde(default)]
    pub github_url: String,

    /// Latest public release tag
    #[serde(default)]
    pub latest_public_release: Option<String>,

    /// Newest pre-release tag
    #[serde(default)]
    pub newest_pre_release: Option<String>,
}

/// The release ledger document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// Known repositories
    #[serde(default)]
    pub repositories: Vec<LedgerRepository>,

    /// All known past releases across repositories
    #[serde(default)]
    pub releases: Vec<LedgerRelease>,
}
