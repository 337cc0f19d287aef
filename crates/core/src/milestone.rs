//! Milestone cross-reference types - M1/M3/M4 within a release cycle.

use serde::{Deserialize, Serialize};

/// API version within a milestone release.
///
/// One of these exists per planned API even when the milestone release did
/// not contain that API (the version is then null), so consumers can
/// always index by planned API name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReleaseApi {
    /// Planned API identifier
    pub api_name: String,

    /// Version the API had in the milestone release, null if unachieved
    /// or absent from that release
    pub api_version: Option<String>,
}

/// A milestone release (M1/M3/M4) within a release cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneRelease {
    /// Tag of the earliest qualifying release, null if unachieved
    pub release_tag: Option<String>,

    /// ISO-8601 date of that release, null if unachieved
    pub release_date: Option<String>,

    /// Per-planned-API versions in that release
    pub apis: Vec<CycleReleaseApi>,
}

impl MilestoneRelease {
    /// The unachieved shape: null tag/date, every planned API mapped to null.
    pub fn unachieved(planned_apis: &[String]) -> Self {
        Self {
            release_tag: None,
            release_date: None,
            apis: planned_apis
                .iter()
                .map(|name| CycleReleaseApi {
                    api_name: name.clone(),
                    api_version: None,
                })
                .collect(),
        }
    }

    /// Whether this milestone was achieved.
    pub fn is_achieved(&self) -> bool {
        self.release_tag.is_some()
    }
}

/// M1/M3/M4 milestone releases for a repository within one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReleases {
    /// First pre-release-alpha
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m1: Option<MilestoneRelease>,

    /// First pre-release-rc
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m3: Option<MilestoneRelease>,

    /// First public-release
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m4: Option<MilestoneRelease>,
}

/// Aggregate progress counts for one cycle, summed across entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaReleaseSummary {
    /// Cycle name
    pub name: String,

    /// Planned API count across contributing entries
    pub total_apis: usize,

    /// APIs present in an achieved M1
    pub m1_achieved: usize,

    /// APIs present in an achieved M3
    pub m3_achieved: usize,

    /// APIs present in an achieved M4
    pub m4_achieved: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unachieved_keeps_planned_api_names() {
        let m = MilestoneRelease::unachieved(&["api-a".to_string(), "api-b".to_string()]);
        assert!(!m.is_achieved());
        assert_eq!(m.apis.len(), 2);
        assert_eq!(m.apis[0].api_name, "api-a");
        assert!(m.apis[0].api_version.is_none());
    }

    #[test]
    fn partial_cycle_omits_absent_milestones() {
        let cr = CycleReleases {
            m1: Some(MilestoneRelease {
                release_tag: Some("r4.1".to_string()),
                release_date: Some("2026-02-10T14:30:00Z".to_string()),
                apis: vec![CycleReleaseApi {
                    api_name: "api-a".to_string(),
                    api_version: Some("1.0.0-alpha.1".to_string()),
                }],
            }),
            m3: None,
            m4: None,
        };
        let yaml = serde_yaml::to_string(&cr).unwrap();
        assert!(yaml.contains("m1:"));
        assert!(!yaml.contains("m3:"));
        assert!(!yaml.contains("m4:"));
    }
}
