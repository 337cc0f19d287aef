//! Ledger input and report output.

use std::path::Path;

use chrono::Utc;
use reltrack_core::{Ledger, ProgressReport, ReportMetadata};
use reltrack_engine::build_meta_release_summaries;
use tracing::info;

use crate::collect::CollectionOutcome;
use crate::Result;

/// Version of the report schema this collector writes.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Load the release ledger from disk.
pub fn load_ledger(path: impl AsRef<Path>) -> Result<Ledger> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Assemble the report from a collection outcome.
///
/// Stamps the current UTC time, fills the cycle summaries sorted by name,
/// and rounds the duration to 0.1s.
pub fn build_report(outcome: CollectionOutcome, duration_seconds: f64) -> ProgressReport {
    let mut stats = outcome.stats;
    stats.duration_seconds = (duration_seconds * 10.0).round() / 10.0;

    let meta_releases = build_meta_release_summaries(&outcome.entries)
        .into_values()
        .collect();

    ProgressReport {
        metadata: ReportMetadata {
            last_updated: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            collector_version: env!("CARGO_PKG_VERSION").to_string(),
            collection_stats: stats,
        },
        meta_releases,
        progress: outcome.entries,
    }
}

/// Serialize the report to YAML at the given path.
pub fn write_report(report: &ProgressReport, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(report)?;
    std::fs::write(path, yaml)?;

    let stats = &report.metadata.collection_stats;
    info!(
        "collection complete: {} repos scanned, {} with plan, {} planned, {} API calls in {:.1}s",
        stats.repos_scanned,
        stats.repos_with_plan,
        stats.repos_planned,
        stats.api_calls,
        stats.duration_seconds,
    );
    Ok(())
}
