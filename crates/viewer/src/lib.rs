//! Reltrack HTML viewer generation.
//!
//! Turns a serialized progress report into one self-contained HTML file by
//! injecting the report data as JSON into the bundled template. The report
//! is consumed unmodified - the viewer never recomputes anything.

#![warn(missing_docs)]

use std::path::Path;

use tracing::info;

/// Bundled viewer page with a `{{PROGRESS_DATA}}` placeholder.
const TEMPLATE: &str = include_str!("../templates/viewer.html");

const DATA_PLACEHOLDER: &str = "{{PROGRESS_DATA}}";

/// Error type for viewer generation.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Report file unreadable or output unwritable
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report not parseable as YAML
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Report not parseable as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for viewer generation.
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Generate a self-contained HTML viewer from a serialized report.
///
/// The report format is chosen by extension: `.json` parses as JSON,
/// anything else as YAML. Parent directories of the output path are
/// created as needed.
pub fn generate_viewer(data_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<()> {
    let data_path = data_path.as_ref();
    let output_path = output_path.as_ref();

    let content = std::fs::read_to_string(data_path)?;
    let data: serde_json::Value = if data_path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    let data_json = serde_json::to_string_pretty(&data)?;

    let html = TEMPLATE.replace(DATA_PLACEHOLDER, &data_json);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, &html)?;

    info!(
        output = %output_path.display(),
        bytes = html.len(),
        "generated viewer"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_YAML: &str = r#"
metadata:
  last_updated: "2026-03-15T10:00:00Z"
  schema_version: 1.0.0
  collector_version: 1.0.0
  collection_stats:
    repos_scanned: 2
    repos_with_plan: 1
    repos_planned: 1
    api_calls: 12
    duration_seconds: 3.2
meta_releases:
  - name: Sync26
    total_apis: 1
    m1_achieved: 1
    m3_achieved: 0
    m4_achieved: 0
progress:
  - repository: QualityOnDemand
    github_url: https://github.com/acme/QualityOnDemand
    target_release_tag: r4.1
    target_release_type: pre-release-rc
    state: snapshot_active
"#;

    #[test]
    fn generates_viewer_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("releases-progress.yaml");
        let output = dir.path().join("viewers").join("progress.html");
        std::fs::write(&data, SAMPLE_YAML).unwrap();

        generate_viewer(&data, &output).unwrap();

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(!html.contains(DATA_PLACEHOLDER));
        assert!(html.contains("snapshot_active"));
        assert!(html.contains("Sync26"));
    }

    #[test]
    fn generates_viewer_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("releases-progress.json");
        let output = dir.path().join("progress.html");
        std::fs::write(
            &data,
            r#"{"metadata": {}, "meta_releases": [], "progress": []}"#,
        )
        .unwrap();

        generate_viewer(&data, &output).unwrap();

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("\"meta_releases\": []"));
    }

    #[test]
    fn missing_report_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = generate_viewer(dir.path().join("absent.yaml"), dir.path().join("out.html"));
        assert!(matches!(result, Err(ViewerError::Io(_))));
    }

    #[test]
    fn malformed_report_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("bad.yaml");
        std::fs::write(&data, "{{invalid").unwrap();
        let result = generate_viewer(&data, dir.path().join("out.html"));
        assert!(matches!(result, Err(ViewerError::Yaml(_))));
    }
}
