//! Reltrack collection orchestrator.
//!
//! Sequences per-repository work: read the declared release plan, fetch
//! artifacts through a [`ReleaseHost`], derive the progress state,
//! cross-reference the release ledger for milestones, run validation
//! checks, and assemble the final report. One repository's failure never
//! aborts the batch; rate-limit exhaustion is the single fatal signal and
//! even then the entries collected so far are preserved and reported.

#![warn(missing_docs)]

mod collect;
mod output;

pub use collect::{parse_release_plan, CollectionOutcome, Collector};
pub use output::{build_report, load_ledger, write_report, SCHEMA_VERSION};

use reltrack_github::GithubError;

/// Error type for collection operations.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// I/O failure reading the ledger or writing the report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ledger or report (de)serialization failure
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Remote host failure
    #[error(transparent)]
    Github(#[from] GithubError),
}

/// Result alias for collection operations.
pub type Result<T> = std::result::Result<T, CollectError>;
