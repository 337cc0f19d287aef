//! Validation warnings attached to progress entries.

use serde::{Deserialize, Serialize};

/// Warning severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something is likely wrong and should be looked at
    Warning,
    /// Advisory only
    Info,
}

/// A validation warning attached to a progress entry.
///
/// Warnings annotate entries without ever changing the derived state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressWarning {
    /// Stable short identifier, e.g. "W001"
    pub code: String,

    /// Human-readable description
    pub message: String,

    /// Severity level
    pub severity: Severity,
}

impl ProgressWarning {
    /// Create a warning-severity annotation.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// Create an info-severity annotation.
    pub fn info(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: Severity::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_constructor_sets_severity() {
        let w = ProgressWarning::warning("W001", "plan diverged");
        assert_eq!(w.code, "W001");
        assert_eq!(w.severity, Severity::Warning);

        let i = ProgressWarning::info("W099", "heads up");
        assert_eq!(i.severity, Severity::Info);
    }

    #[test]
    fn severity_serializes_lowercase() {
        let w = ProgressWarning::warning("W002", "orphan");
        let yaml = serde_yaml::to_string(&w).unwrap();
        assert!(yaml.contains("severity: warning"));
    }
}
