//! Reltrack core data models.
//!
//! This crate defines the data structures shared by the collector, the
//! derivation engine, and the report/viewer pipeline. It is pure data:
//! no I/O, no remote access.

#![warn(missing_docs)]

// Progress state and warnings
mod state;
mod warning;

// Per-repository report entry
mod entry;

// Milestone cross-reference
mod milestone;

// Input documents
mod ledger;
mod plan;

// Output envelope
mod report;

// Re-exports
pub use state::ProgressState;
pub use warning::{ProgressWarning, Severity};

pub use entry::{
    ArtifactInfo, DraftRelease, DraftSummary, ProgressEntry, PublishedContext, ReleaseIssue,
    ReleasePr,
};
pub use milestone::{CycleReleaseApi, CycleReleases, MetaReleaseSummary, MilestoneRelease};
pub use ledger::{Ledger, LedgerRelease, LedgerRepository, ReleaseApi};
pub use plan::{ApiEntry, PlanRepository, ReleasePlan};
pub use report::{CollectionStats, ProgressReport, ReportMetadata};
