//! Per-repository release plan - the declared release intent.

use serde::{Deserialize, Serialize};

/// An API planned for a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEntry {
    /// API identifier
    #[serde(default)]
    pub api_name: String,

    /// Version the plan targets
    #[serde(default)]
    pub target_api_version: String,

    /// Status the plan targets, e.g. "rc"
    #[serde(default)]
    pub target_api_status: String,

    /// Maintainer handles; omitted from the serialized form when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub main_contacts: Vec<String>,
}

/// The `repository` section of a release plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanRepository {
    /// Release track label
    #[serde(default)]
    pub release_track: Option<String>,

    /// Cycle (meta-release) the repository participates in
    #[serde(default)]
    pub meta_release: Option<String>,

    /// Target release tag
    #[serde(default)]
    pub target_release_tag: Option<String>,

    /// Target release type; "none" or absent means no release intent
    #[serde(default)]
    pub target_release_type: Option<String>,
}

/// A repository's declared release plan.
///
/// Immutable once read for a collection pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleasePlan {
    /// Repository-level intent
    #[serde(default)]
    pub repository: PlanRepository,

    /// Free-form dependency pins
    #[serde(default)]
    pub dependencies: Option<serde_json::Value>,

    /// APIs declared for this release, in plan order
    #[serde(default)]
    pub apis: Vec<ApiEntry>,
}

impl ReleasePlan {
    /// Names of the planned APIs, in plan order.
    pub fn planned_api_names(&self) -> Vec<String> {
        self.apis.iter().map(|a| a.api_name.clone()).collect()
    }
}
