//! Per-repository collection pipeline and batch loop.

use reltrack_checks::CheckRegistry;
use reltrack_core::{
    CollectionStats, DraftSummary, Ledger, LedgerRelease, LedgerRepository, ProgressEntry,
    PublishedContext, ReleasePlan,
};
use reltrack_engine::{derive_state, find_matching_snapshot};
use tracing::{debug, error, warn};

use crate::Result;

/// Path of the per-repository declaration file.
const PLAN_PATH: &str = "release-plan.yaml";

/// Branch namespace scanned for snapshot branches.
const SNAPSHOT_NAMESPACE: &str = "release-snapshot/";

/// Parse release-plan.yaml content.
///
/// Malformed YAML yields `None` (logged by the caller as a skip), never an
/// error - a broken plan must not take down the batch.
pub fn parse_release_plan(content: &str) -> Option<ReleasePlan> {
    match serde_yaml::from_str(content) {
        Ok(plan) => Some(plan),
        Err(e) => {
            warn!("failed to parse {PLAN_PATH}: {e}");
            None
        }
    }
}

/// Entries plus run statistics from one collection pass.
#[derive(Debug, Default)]
pub struct CollectionOutcome {
    /// Per-repository entries, in ledger order
    pub entries: Vec<ProgressEntry>,

    /// Run statistics (duration and api_calls are filled by the caller
    /// that owns the clock and the host)
    pub stats: CollectionStats,

    /// Whether the pass was cut short by rate-limit exhaustion
    pub aborted: bool,
}

/// Collection service over a remote host.
pub struct Collector<H: reltrack_github::ReleaseHost> {
    host: H,
    registry: CheckRegistry,
}

impl<H: reltrack_github::ReleaseHost> Collector<H> {
    /// Create a collector with the built-in check registry.
    pub fn new(host: H) -> Self {
        Self {
            host,
            registry: CheckRegistry::default(),
        }
    }

    /// Replace the check registry.
    pub fn with_registry(mut self, registry: CheckRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Access the underlying host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Collect progress for a single repository.
    ///
    /// Returns `Ok(None)` when the repository declares no plan (absent or
    /// malformed declaration file) - the repository is skipped for this
    /// pass, not failed.
    pub async fn collect_repo(
        &self,
        repo: &LedgerRepository,
        all_releases: &[LedgerRelease],
    ) -> Result<Option<ProgressEntry>> {
        let name = repo.repository.as_str();

        let Some(content) = self.host.file_content(name, PLAN_PATH, "main").await? else {
            debug!(repo = name, "no {PLAN_PATH}, skipping");
            return Ok(None);
        };
        let Some(plan) = parse_release_plan(&content) else {
            warn!(repo = name, "malformed {PLAN_PATH}, skipping");
            return Ok(None);
        };

        let mut entry = ProgressEntry::new(name, repo.github_url.clone());
        entry.release_track = plan.repository.release_track.clone();
        entry.meta_release = plan.repository.meta_release.clone();
        entry.target_release_tag = plan.repository.target_release_tag.clone();
        entry.target_release_type = plan.repository.target_release_type.clone();
        entry.dependencies = plan.dependencies.clone();
        entry.apis = plan.apis.clone();
        entry.published_context = PublishedContext {
            latest_public_release: repo.latest_public_release.clone(),
            newest_pre_release: repo.newest_pre_release.clone(),
        };

        let release_type = plan.repository.target_release_type.as_deref();
        let target_tag = plan.repository.target_release_tag.as_deref();
        let planned_apis = plan.planned_api_names();

        let withdrawn = !release_type.is_some_and(|t| !t.is_empty() && t != "none");
        if withdrawn {
            entry.state = derive_state(release_type, target_tag, false, &[], &[]);
            // Withdrawn repos skip artifact fetches except the branch
            // listing needed for the orphaned-snapshot check
            let branches = self.host.list_branches(name, SNAPSHOT_NAMESPACE).await?;
            entry.artifacts.snapshot_branch =
                find_matching_snapshot(&branches, target_tag).map(str::to_string);
        } else {
            let tag_exists = match target_tag {
                Some(tag) => self.host.tag_exists(name, tag).await?,
                None => false,
            };
            let branches = self.host.list_branches(name, SNAPSHOT_NAMESPACE).await?;
            let drafts = self.host.draft_releases(name).await?;

            entry.state = derive_state(release_type, target_tag, tag_exists, &branches, &drafts);

            if let Some(snapshot) = find_matching_snapshot(&branches, target_tag) {
                entry.artifacts.snapshot_branch = Some(snapshot.to_string());
                entry.artifacts.release_pr = self.host.find_release_pr(name, snapshot).await?;
            }

            if let Some(tag) = target_tag.filter(|t| !t.is_empty()) {
                entry.artifacts.draft_release = drafts
                    .iter()
                    .find(|d| {
                        d.name.as_deref().is_some_and(|n| n.contains(tag))
                            || d.tag_name.as_deref().is_some_and(|t| t.contains(tag))
                    })
                    .map(|d| DraftSummary {
                        name: d.name.clone(),
                        url: d.html_url.clone(),
                    });
            }

            entry.artifacts.release_issue = self.host.find_release_issue(name).await?;
        }

        entry.cycle_releases = reltrack_engine::derive_cycle_releases(
            name,
            plan.repository.meta_release.as_deref(),
            all_releases,
            &planned_apis,
        );

        let repo_releases: Vec<LedgerRelease> = all_releases
            .iter()
            .filter(|r| r.repository == name)
            .cloned()
            .collect();
        entry.warnings = self.registry.generate_warnings(&entry, &repo_releases);

        Ok(Some(entry))
    }

    /// Collect progress for every repository in the ledger.
    ///
    /// Per-repository failures are logged and skipped. Rate-limit
    /// exhaustion aborts the remaining batch; entries already collected
    /// stay in the outcome.
    pub async fn collect_all(&self, ledger: &Ledger) -> CollectionOutcome {
        let mut outcome = CollectionOutcome {
            stats: CollectionStats {
                repos_scanned: ledger.repositories.len(),
                ..CollectionStats::default()
            },
            ..CollectionOutcome::default()
        };

        for repo in &ledger.repositories {
            match self.collect_repo(repo, &ledger.releases).await {
                Ok(Some(entry)) => {
                    outcome.stats.repos_with_plan += 1;
                    if entry.state.is_active() {
                        outcome.stats.repos_planned += 1;
                    }
                    outcome.entries.push(entry);
                }
                Ok(None) => {}
                Err(crate::CollectError::Github(e)) if e.is_fatal() => {
                    error!("rate limit exhausted, aborting collection: {e}");
                    outcome.aborted = true;
                    break;
                }
                Err(e) => {
                    warn!(repo = %repo.repository, "collection failed: {e}");
                }
            }
        }

        outcome.stats.api_calls = self.host.api_calls();
        outcome
    }
}
