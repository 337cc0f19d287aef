//! Reltrack validation checks.
//!
//! Warnings annotate progress entries without changing derived state.
//! Checks are pure over their two inputs - a fully-derived entry and the
//! repository's ledger releases - so warning generation never issues
//! additional remote fetches.
//!
//! New checks implement [`Check`] and are registered on a [`CheckRegistry`];
//! the registry is an explicit value constructed at the call site, so tests
//! can build an isolated registry instead of mutating shared state.

#![warn(missing_docs)]

mod builtin;

pub use builtin::{OrphanedSnapshot, PublishedPlanDiverged};

use reltrack_core::{LedgerRelease, ProgressEntry, ProgressWarning};

/// A single validation check.
pub trait Check: Send + Sync {
    /// Stable warning code this check emits, e.g. "W001".
    fn code(&self) -> &'static str;

    /// Run the check. Zero or more warnings; absence of output is normal.
    fn run(&self, entry: &ProgressEntry, repo_releases: &[LedgerRelease]) -> Vec<ProgressWarning>;
}

/// Ordered registry of checks.
///
/// Registration order determines emission order. [`CheckRegistry::default`]
/// carries the built-in checks.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// Append a check.
    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every registered check in order, concatenating their output.
    pub fn generate_warnings(
        &self,
        entry: &ProgressEntry,
        repo_releases: &[LedgerRelease],
    ) -> Vec<ProgressWarning> {
        let mut warnings = Vec::new();
        for check in &self.checks {
            let produced = check.run(entry, repo_releases);
            if !produced.is_empty() {
                tracing::debug!(
                    repository = %entry.repository,
                    code = check.code(),
                    count = produced.len(),
                    "check fired"
                );
            }
            warnings.extend(produced);
        }
        warnings
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(PublishedPlanDiverged)); // W001
        registry.register(Box::new(OrphanedSnapshot)); // W002
        registry
    }
}
