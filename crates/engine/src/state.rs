//! Progress state derivation from repository artifacts.

use reltrack_core::{DraftRelease, ProgressState};

/// Prefix convention for snapshot branches: `release-snapshot/{tag}-{suffix}`.
const SNAPSHOT_PREFIX: &str = "release-snapshot/";

/// Derive the progress state from declared intent plus observed artifacts.
///
/// Strict priority order, first match wins:
/// 1. release type absent, empty, or `"none"` - `NotPlanned`
/// 2. tag exists - `Published`
/// 3. matching snapshot branch plus matching draft - `DraftReady`
/// 4. matching snapshot branch only - `SnapshotActive`
/// 5. otherwise - `Planned`
///
/// A withdrawn intent wins over any leftover artifacts, and a published
/// tag wins over stale snapshot/draft artifacts.
pub fn derive_state(
    release_type: Option<&str>,
    target_tag: Option<&str>,
    tag_exists: bool,
    snapshot_branches: &[String],
    draft_releases: &[DraftRelease],
) -> ProgressState {
    if !release_type.is_some_and(|t| !t.is_empty() && t != "none") {
        return ProgressState::NotPlanned;
    }

    if tag_exists {
        return ProgressState::Published;
    }

    if find_matching_snapshot(snapshot_branches, target_tag).is_some() {
        if has_matching_draft(draft_releases, target_tag) {
            return ProgressState::DraftReady;
        }
        return ProgressState::SnapshotActive;
    }

    ProgressState::Planned
}

/// Find the snapshot branch matching a target release tag.
///
/// Returns the first branch (in input order) named
/// `release-snapshot/{target_tag}-{suffix}`. The `-` after the tag is the
/// boundary: target `r4` never matches `release-snapshot/r4.2-xyz`.
pub fn find_matching_snapshot<'a>(
    branches: &'a [String],
    target_tag: Option<&str>,
) -> Option<&'a str> {
    let tag = target_tag.filter(|t| !t.is_empty())?;
    let prefix = format!("{SNAPSHOT_PREFIX}{tag}-");
    branches
        .iter()
        .find(|b| b.starts_with(&prefix))
        .map(String::as_str)
}

/// Whether any draft release matches the target tag.
///
/// Draft names and tag names typically contain the release tag; substring
/// containment in either field counts.
fn has_matching_draft(draft_releases: &[DraftRelease], target_tag: Option<&str>) -> bool {
    let Some(tag) = target_tag.filter(|t| !t.is_empty()) else {
        return false;
    };
    draft_releases.iter().any(|d| {
        d.name.as_deref().is_some_and(|n| n.contains(tag))
            || d.tag_name.as_deref().is_some_and(|t| t.contains(tag))
    })
}
