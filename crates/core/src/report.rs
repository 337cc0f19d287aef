//! Report envelope - the structured hand-off artifact for rendering.

use serde::{Deserialize, Serialize};

use crate::entry::ProgressEntry;
use crate::milestone::MetaReleaseSummary;

/// Statistics about a collection run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    /// Repositories listed in the ledger
    pub repos_scanned: usize,

    /// Repositories with a readable release plan
    pub repos_with_plan: usize,

    /// Repositories in an active (non-NOT_PLANNED) state
    pub repos_planned: usize,

    /// Remote API calls issued
    pub api_calls: u64,

    /// Wall-clock duration, rounded to 0.1s
    pub duration_seconds: f64,
}

/// Report metadata block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// UTC timestamp of the run, ISO-8601
    pub last_updated: String,

    /// Report schema version
    pub schema_version: String,

    /// Collector tool version
    pub collector_version: String,

    /// Run statistics
    pub collection_stats: CollectionStats,
}

/// Top-level progress report.
///
/// The sole hand-off artifact: serialized once per pass and consumed
/// unmodified by the viewer generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Run metadata and statistics
    pub metadata: ReportMetadata,

    /// Per-cycle summaries, ordered by cycle name
    pub meta_releases: Vec<MetaReleaseSummary>,

    /// Per-repository entries
    pub progress: Vec<ProgressEntry>,
}
