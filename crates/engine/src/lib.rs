//! Reltrack derivation engine.
//!
//! Pure, side-effect-free derivation logic: progress state from observed
//! artifacts, and M1/M3/M4 milestone cross-reference from the release
//! ledger. No remote access - every function operates on pre-fetched,
//! in-memory values and is safe to call concurrently.

#![warn(missing_docs)]

mod milestone;
mod state;

pub use milestone::{build_meta_release_summaries, derive_cycle_releases};
pub use state::{derive_state, find_matching_snapshot};
