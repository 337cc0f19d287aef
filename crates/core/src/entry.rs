//! Per-repository progress entry and its artifact summary.

use serde::{Deserialize, Serialize};

use crate::milestone::CycleReleases;
use crate::plan::ApiEntry;
use crate::state::ProgressState;
use crate::warning::ProgressWarning;

/// A draft release as observed on the hosting platform.
///
/// Raw fetch result; the entry keeps only a [`DraftSummary`] of the draft
/// that matches the target tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftRelease {
    /// Display name, may be absent
    #[serde(default)]
    pub name: Option<String>,

    /// Tag the draft will publish under, may be absent
    #[serde(default)]
    pub tag_name: Option<String>,

    /// Web URL
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Pull request targeting the snapshot branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasePr {
    /// PR number
    pub number: u64,
    /// PR state ("open", "closed")
    pub state: String,
    /// Web URL
    pub url: String,
}

/// Matching draft release kept on the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSummary {
    /// Draft display name
    pub name: Option<String>,
    /// Web URL
    pub url: Option<String>,
}

/// Open release-tracking issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseIssue {
    /// Issue number
    pub number: u64,
    /// Web URL
    pub url: String,
}

/// Release artifacts found in the repository.
///
/// Every field is nullable and serialized explicitly so report consumers
/// can index without presence checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactInfo {
    /// Snapshot branch matching the target tag
    pub snapshot_branch: Option<String>,

    /// Pull request targeting the snapshot branch
    pub release_pr: Option<ReleasePr>,

    /// Draft release matching the target tag
    pub draft_release: Option<DraftSummary>,

    /// Open release-tracking issue
    pub release_issue: Option<ReleaseIssue>,
}

/// Previously-published context from the release ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedContext {
    /// Latest public release tag, if any
    pub latest_public_release: Option<String>,

    /// Newest pre-release tag, if any
    pub newest_pre_release: Option<String>,
}

/// Full progress entry for a repository.
///
/// Constructed once per repository per collection pass and never mutated
/// after the pass completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Repository name
    pub repository: String,

    /// Repository web URL
    pub github_url: String,

    /// Release track label from the plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_track: Option<String>,

    /// Cycle (meta-release) the repository participates in; `None` for
    /// independent repositories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_release: Option<String>,

    /// Declared target release tag
    pub target_release_tag: Option<String>,

    /// Declared target release type ("none" means withdrawn)
    pub target_release_type: Option<String>,

    /// Free-form dependency pins from the plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<serde_json::Value>,

    /// APIs planned for this release, in plan order
    pub apis: Vec<ApiEntry>,

    /// Derived progress state
    pub state: ProgressState,

    /// Observed artifact summary
    pub artifacts: ArtifactInfo,

    /// Published-release context from the ledger
    pub published_context: PublishedContext,

    /// Milestone cross-reference; absent for independent repositories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_releases: Option<CycleReleases>,

    /// Validation warnings; omitted from the serialized form when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ProgressWarning>,
}

impl ProgressEntry {
    /// Create an entry with no plan data, artifacts, or warnings.
    pub fn new(repository: impl Into<String>, github_url: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            github_url: github_url.into(),
            release_track: None,
            meta_release: None,
            target_release_tag: None,
            target_release_type: None,
            dependencies: None,
            apis: Vec::new(),
            state: ProgressState::default(),
            artifacts: ArtifactInfo::default(),
            published_context: PublishedContext::default(),
            cycle_releases: None,
            warnings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_defaults() {
        let e = ProgressEntry::new("TestRepo", "https://github.com/acme/TestRepo");
        assert_eq!(e.state, ProgressState::NotPlanned);
        assert!(e.apis.is_empty());
        assert!(e.cycle_releases.is_none());
        assert!(e.warnings.is_empty());
    }

    #[test]
    fn empty_warnings_omitted_from_yaml() {
        let e = ProgressEntry::new("TestRepo", "https://github.com/acme/TestRepo");
        let yaml = serde_yaml::to_string(&e).unwrap();
        assert!(!yaml.contains("warnings"));
        assert!(!yaml.contains("cycle_releases"));
        // Nullable artifact fields stay explicit
        assert!(yaml.contains("snapshot_branch: null"));
        assert!(yaml.contains("target_release_tag: null"));
    }

    #[test]
    fn populated_entry_round_trips() {
        let mut e = ProgressEntry::new("QualityOnDemand", "https://github.com/acme/QualityOnDemand");
        e.release_track = Some("meta-release".to_string());
        e.meta_release = Some("Sync26".to_string());
        e.target_release_tag = Some("r4.2".to_string());
        e.target_release_type = Some("pre-release-rc".to_string());
        e.state = ProgressState::SnapshotActive;
        e.artifacts.snapshot_branch = Some("release-snapshot/r4.2-abc".to_string());
        e.published_context = PublishedContext {
            latest_public_release: Some("r3.2".to_string()),
            newest_pre_release: Some("r4.1".to_string()),
        };
        e.warnings.push(ProgressWarning::warning("W001", "test"));

        let yaml = serde_yaml::to_string(&e).unwrap();
        let back: ProgressEntry = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.state, ProgressState::SnapshotActive);
        assert_eq!(back.warnings[0].code, "W001");
        assert_eq!(
            back.published_context.latest_public_release.as_deref(),
            Some("r3.2")
        );
    }
}
