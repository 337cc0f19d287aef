//! Built-in validation checks.

use reltrack_core::{LedgerRelease, ProgressEntry, ProgressState, ProgressWarning};

use crate::Check;

/// W001: state is PUBLISHED but the plan's API versions differ from the
/// published release.
///
/// Catches the case where a tag exists (so the state is PUBLISHED) but the
/// release plan has been updated with new target versions for the next
/// cycle while still pointing at the old tag. Fires at most once per
/// entry, for the first mismatching API in plan order.
pub struct PublishedPlanDiverged;

impl Check for PublishedPlanDiverged {
    fn code(&self) -> &'static str {
        "W001"
    }

    fn run(&self, entry: &ProgressEntry, repo_releases: &[LedgerRelease]) -> Vec<ProgressWarning> {
        if entry.state != ProgressState::Published {
            return Vec::new();
        }
        let Some(target_tag) = entry.target_release_tag.as_deref() else {
            return Vec::new();
        };
        if entry.apis.is_empty() {
            return Vec::new();
        }

        let Some(published) = repo_releases
            .iter()
            .find(|r| r.release_tag.as_deref() == Some(target_tag))
        else {
            return Vec::new();
        };

        for planned in &entry.apis {
            let Some(recorded) = published
                .apis
                .iter()
                .find(|a| !a.api_name.is_empty() && a.api_name == planned.api_name)
            else {
                continue;
            };
            let base = base_version(recorded.api_version.as_deref());
            if !base.is_empty() && base != planned.target_api_version {
                return vec![ProgressWarning::warning(
                    "W001",
                    format!(
                        "Plan targets {} {} but {} published {}",
                        planned.api_name, planned.target_api_version, target_tag, base
                    ),
                )];
            }
        }

        Vec::new()
    }
}

/// Strip the hyphen-delimited pre-release suffix: "1.1.0-rc.2" -> "1.1.0".
fn base_version(version: Option<&str>) -> &str {
    version
        .map(|v| v.split('-').next().unwrap_or(""))
        .unwrap_or("")
}

/// W002: a snapshot branch exists but the release type is "none".
///
/// Catches orphaned artifacts from a withdrawn or completed cycle that
/// were never cleaned up.
pub struct OrphanedSnapshot;

impl Check for OrphanedSnapshot {
    fn code(&self) -> &'static str {
        "W002"
    }

    fn run(&self, entry: &ProgressEntry, _repo_releases: &[LedgerRelease]) -> Vec<ProgressWarning> {
        if entry.state != ProgressState::NotPlanned {
            return Vec::new();
        }
        match entry.artifacts.snapshot_branch.as_deref() {
            Some(branch) => vec![ProgressWarning::warning(
                "W002",
                format!("Snapshot branch {branch} exists but release type is 'none'"),
            )],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CheckRegistry;
    use reltrack_core::{ApiEntry, ReleaseApi};

    fn make_entry(state: ProgressState) -> ProgressEntry {
        let mut e = ProgressEntry::new("TestRepo", "https://github.com/acme/TestRepo");
        e.state = state;
        e.target_release_tag = Some("r4.1".to_string());
        e.target_release_type = Some("pre-release-rc".to_string());
        e
    }

    fn planned_api(name: &str, version: &str) -> ApiEntry {
        ApiEntry {
            api_name: name.to_string(),
            target_api_version: version.to_string(),
            target_api_status: "public".to_string(),
            main_contacts: Vec::new(),
        }
    }

    fn ledger_release(tag: &str, apis: &[(&str, &str)]) -> LedgerRelease {
        LedgerRelease {
            repository: "TestRepo".to_string(),
            release_tag: Some(tag.to_string()),
            apis: apis
                .iter()
                .map(|(n, v)| ReleaseApi {
                    api_name: n.to_string(),
                    api_version: Some(v.to_string()),
                })
                .collect(),
            ..LedgerRelease::default()
        }
    }

    #[test]
    fn w001_fires_when_versions_differ() {
        let mut entry = make_entry(ProgressState::Published);
        entry.apis = vec![planned_api("quality-on-demand", "2.0.0")];
        let releases = vec![ledger_release("r4.1", &[("quality-on-demand", "1.1.0")])];

        let warnings = CheckRegistry::default().generate_warnings(&entry, &releases);
        let w001: Vec<_> = warnings.iter().filter(|w| w.code == "W001").collect();
        assert_eq!(w001.len(), 1);
        assert!(w001[0].message.contains("2.0.0"));
        assert!(w001[0].message.contains("1.1.0"));
    }

    #[test]
    fn w001_strips_prerelease_suffix_before_compare() {
        let mut entry = make_entry(ProgressState::Published);
        entry.apis = vec![planned_api("quality-on-demand", "1.1.0")];
        let releases = vec![ledger_release("r4.1", &[("quality-on-demand", "1.1.0-rc.2")])];

        let warnings = CheckRegistry::default().generate_warnings(&entry, &releases);
        assert!(warnings.iter().all(|w| w.code != "W001"));
    }

    #[test]
    fn w001_silent_for_non_published_states() {
        let mut entry = make_entry(ProgressState::Planned);
        entry.apis = vec![planned_api("quality-on-demand", "2.0.0")];
        let releases = vec![ledger_release("r4.1", &[("quality-on-demand", "1.1.0")])];

        let warnings = CheckRegistry::default().generate_warnings(&entry, &releases);
        assert!(warnings.iter().all(|w| w.code != "W001"));
    }

    #[test]
    fn w001_silent_when_target_release_absent_from_ledger() {
        let mut entry = make_entry(ProgressState::Published);
        entry.apis = vec![planned_api("quality-on-demand", "2.0.0")];
        let releases = vec![ledger_release("r3.9", &[("quality-on-demand", "1.1.0")])];

        let warnings = CheckRegistry::default().generate_warnings(&entry, &releases);
        assert!(warnings.iter().all(|w| w.code != "W001"));
    }

    #[test]
    fn w001_fires_once_even_with_multiple_mismatches() {
        let mut entry = make_entry(ProgressState::Published);
        entry.apis = vec![planned_api("api-a", "2.0.0"), planned_api("api-b", "3.0.0")];
        let releases = vec![ledger_release(
            "r4.1",
            &[("api-a", "1.0.0"), ("api-b", "1.5.0")],
        )];

        let warnings = CheckRegistry::default().generate_warnings(&entry, &releases);
        let w001: Vec<_> = warnings.iter().filter(|w| w.code == "W001").collect();
        assert_eq!(w001.len(), 1);
        // First mismatching API in plan order
        assert!(w001[0].message.contains("api-a"));
    }

    #[test]
    fn w001_silent_without_planned_apis() {
        let entry = make_entry(ProgressState::Published);
        let releases = vec![ledger_release("r4.1", &[("quality-on-demand", "1.1.0")])];

        let warnings = CheckRegistry::default().generate_warnings(&entry, &releases);
        assert!(warnings.iter().all(|w| w.code != "W001"));
    }

    #[test]
    fn w002_fires_for_orphaned_snapshot() {
        let mut entry = make_entry(ProgressState::NotPlanned);
        entry.target_release_type = Some("none".to_string());
        entry.artifacts.snapshot_branch = Some("release-snapshot/r4.1-abc123".to_string());

        let warnings = CheckRegistry::default().generate_warnings(&entry, &[]);
        let w002: Vec<_> = warnings.iter().filter(|w| w.code == "W002").collect();
        assert_eq!(w002.len(), 1);
        assert!(w002[0].message.contains("release-snapshot/r4.1-abc123"));
    }

    #[test]
    fn w002_silent_without_snapshot() {
        let mut entry = make_entry(ProgressState::NotPlanned);
        entry.target_release_type = Some("none".to_string());

        let warnings = CheckRegistry::default().generate_warnings(&entry, &[]);
        assert!(warnings.iter().all(|w| w.code != "W002"));
    }

    #[test]
    fn w002_silent_for_active_states() {
        let mut entry = make_entry(ProgressState::SnapshotActive);
        entry.artifacts.snapshot_branch = Some("release-snapshot/r4.1-abc".to_string());

        let warnings = CheckRegistry::default().generate_warnings(&entry, &[]);
        assert!(warnings.iter().all(|w| w.code != "W002"));
    }

    #[test]
    fn base_version_handles_edge_shapes() {
        assert_eq!(base_version(Some("1.1.0-rc.2")), "1.1.0");
        assert_eq!(base_version(Some("1.1.0")), "1.1.0");
        assert_eq!(base_version(Some("")), "");
        assert_eq!(base_version(None), "");
    }
}
