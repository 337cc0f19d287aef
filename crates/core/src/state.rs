//! Progress state - the five-value release lifecycle position.

use serde::{Deserialize, Serialize};

/// Release progress state derived from repository artifacts.
///
/// Exactly one state holds per repository per collection pass. The value
/// is always recomputed from the declared intent plus observed artifacts;
/// it is never persisted across passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    /// Release type is "none" or absent
    NotPlanned,
    /// Declared intent, no artifacts yet
    Planned,
    /// Snapshot branch frozen, no draft release
    SnapshotActive,
    /// Snapshot branch plus a matching draft release
    DraftReady,
    /// Target tag exists
    Published,
}

impl Default for ProgressState {
    fn default() -> Self {
        ProgressState::NotPlanned
    }
}

impl ProgressState {
    /// Whether the repository is actively working toward a release.
    pub fn is_active(self) -> bool {
        !matches!(self, ProgressState::NotPlanned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_snake_case() {
        let s = serde_yaml::to_string(&ProgressState::SnapshotActive).unwrap();
        assert_eq!(s.trim(), "snapshot_active");
        let s = serde_yaml::to_string(&ProgressState::NotPlanned).unwrap();
        assert_eq!(s.trim(), "not_planned");
    }

    #[test]
    fn only_not_planned_is_inactive() {
        assert!(!ProgressState::NotPlanned.is_active());
        assert!(ProgressState::Planned.is_active());
        assert!(ProgressState::SnapshotActive.is_active());
        assert!(ProgressState::DraftReady.is_active());
        assert!(ProgressState::Published.is_active());
    }
}
