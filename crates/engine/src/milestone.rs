//! M1/M3/M4 milestone derivation from ledger data.
//!
//! Milestones within a release cycle:
//! - M1: first pre-release-alpha (earliest by release_date)
//! - M3: first pre-release-rc
//! - M4: first public-release

use std::collections::BTreeMap;

use reltrack_core::{
    CycleReleaseApi, CycleReleases, LedgerRelease, MetaReleaseSummary, MilestoneRelease,
    ProgressEntry,
};

const M1_TYPE: &str = "pre-release-alpha";
const M3_TYPE: &str = "pre-release-rc";
const M4_TYPE: &str = "public-release";

/// Derive M1/M3/M4 milestone releases for a repository within a cycle.
///
/// Returns `None` for independent repositories (no cycle). A repository
/// that is in a cycle but has no releases recorded there yet gets all
/// three milestones in the unachieved shape, so "no releases yet" stays
/// distinguishable from "independent".
pub fn derive_cycle_releases(
    repo: &str,
    cycle: Option<&str>,
    all_releases: &[LedgerRelease],
    planned_apis: &[String],
) -> Option<CycleReleases> {
    let cycle = cycle?;

    let cycle_releases: Vec<&LedgerRelease> = all_releases
        .iter()
        .filter(|r| r.repository == repo && r.meta_release.as_deref() == Some(cycle))
        .collect();

    if cycle_releases.is_empty() {
        return Some(CycleReleases {
            m1: Some(MilestoneRelease::unachieved(planned_apis)),
            m3: Some(MilestoneRelease::unachieved(planned_apis)),
            m4: Some(MilestoneRelease::unachieved(planned_apis)),
        });
    }

    Some(CycleReleases {
        m1: Some(find_earliest_of_type(&cycle_releases, M1_TYPE, planned_apis)),
        m3: Some(find_earliest_of_type(&cycle_releases, M3_TYPE, planned_apis)),
        m4: Some(find_earliest_of_type(&cycle_releases, M4_TYPE, planned_apis)),
    })
}

/// Earliest release of the given type among the cycle's releases.
///
/// Candidates sort ascending by ISO-8601 date string; a missing date sorts
/// first, and the sort is stable so same-dated candidates keep input order.
fn find_earliest_of_type(
    cycle_releases: &[&LedgerRelease],
    release_type: &str,
    planned_apis: &[String],
) -> MilestoneRelease {
    let mut matching: Vec<&LedgerRelease> = cycle_releases
        .iter()
        .copied()
        .filter(|r| r.release_type.as_deref() == Some(release_type))
        .collect();

    if matching.is_empty() {
        return MilestoneRelease::unachieved(planned_apis);
    }

    matching.sort_by(|a, b| {
        a.release_date
            .as_deref()
            .unwrap_or("")
            .cmp(b.release_date.as_deref().unwrap_or(""))
    });
    let earliest = matching[0];

    let apis = planned_apis
        .iter()
        .map(|name| CycleReleaseApi {
            api_name: name.clone(),
            api_version: earliest
                .apis
                .iter()
                .find(|a| !a.api_name.is_empty() && a.api_name == *name)
                .and_then(|a| a.api_version.clone()),
        })
        .collect();

    MilestoneRelease {
        release_tag: earliest.release_tag.clone(),
        release_date: earliest.release_date.clone(),
        apis,
    }
}

/// Build per-cycle aggregate summaries from collected entries.
///
/// Only entries with a cycle contribute. Purely additive and commutative
/// in entry order; the returned map iterates in cycle-name order.
pub fn build_meta_release_summaries(
    entries: &[ProgressEntry],
) -> BTreeMap<String, MetaReleaseSummary> {
    let mut summaries: BTreeMap<String, MetaReleaseSummary> = BTreeMap::new();

    for entry in entries {
        let Some(cycle) = entry.meta_release.as_deref() else {
            continue;
        };

        let summary = summaries
            .entry(cycle.to_string())
            .or_insert_with(|| MetaReleaseSummary {
                name: cycle.to_string(),
                ..MetaReleaseSummary::default()
            });

        summary.total_apis += entry.apis.len();

        if let Some(cr) = &entry.cycle_releases {
            summary.m1_achieved += achieved_api_count(cr.m1.as_ref());
            summary.m3_achieved += achieved_api_count(cr.m3.as_ref());
            summary.m4_achieved += achieved_api_count(cr.m4.as_ref());
        }
    }

    summaries
}

fn achieved_api_count(milestone: Option<&MilestoneRelease>) -> usize {
    match milestone {
        Some(m) if m.is_achieved() => m.apis.iter().filter(|a| a.api_version.is_some()).count(),
        _ => 0,
    }
}
