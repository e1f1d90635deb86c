//! Output renderers and writers for aggregation results.
//!
//! This module handles writing data to disk in two formats:
//! - JSON summary (`summary.json`)
//! - Prometheus text exposition (`test-pyramid.prom`)

pub mod json;
pub mod prometheus;
pub mod schema;

// Re-export main functions
pub use json::{read_summary, render_summary, write_summary};
pub use prometheus::{render_metrics, write_metrics};
pub use schema::{Fixed4, SuiteSummary, SummaryDocument, SummaryTotals};

use crate::aggregator::AggregationResult;
use crate::utils::config::{METRICS_FILE_NAME, SUMMARY_FILE_NAME};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Paths of the artifacts written by [`write_reports`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub summary: PathBuf,
    pub metrics: PathBuf,
}

/// Fixed-point with four decimals, always `.` as separator
pub fn format_decimal(value: f64) -> String {
    format!("{:.4}", value)
}

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Write both artifacts into `output_dir`, creating it if needed
///
/// **Public** - main entry point for output
///
/// Both documents are rendered before either file is touched, so a
/// rendering failure leaves the directory as it was.
pub fn write_reports(
    result: &AggregationResult,
    output_dir: impl AsRef<Path>,
) -> Result<ReportPaths, OutputError> {
    let output_dir = output_dir.as_ref();

    let summary = render_summary(result)?;
    let metrics = render_metrics(result);

    if output_dir.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Output directory is empty".to_string()));
    }
    if output_dir.is_file() {
        return Err(OutputError::InvalidPath(format!(
            "Output directory is a file: {}",
            output_dir.display()
        )));
    }
    if !output_dir.exists() {
        debug!("Creating output directory: {}", output_dir.display());
        std::fs::create_dir_all(output_dir).map_err(|e| {
            OutputError::InvalidPath(format!(
                "Cannot create directory {}: {}",
                output_dir.display(),
                e
            ))
        })?;
    }

    let paths = ReportPaths {
        summary: output_dir.join(SUMMARY_FILE_NAME),
        metrics: output_dir.join(METRICS_FILE_NAME),
    };

    validate_path(&paths.metrics)?;
    validate_path(&paths.summary)?;

    std::fs::write(&paths.metrics, &metrics)?;
    info!("Wrote test pyramid metrics to {}", paths.metrics.display());
    std::fs::write(&paths.summary, &summary)?;
    info!(
        "Wrote test pyramid summary to {} ({} bytes)",
        paths.summary.display(),
        summary.len()
    );

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(0.75), "0.7500");
        assert_eq!(format_decimal(100.0), "100.0000");
        assert_eq!(format_decimal(1.0 / 3.0), "0.3333");
        assert_eq!(format_decimal(0.0), "0.0000");
    }

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_write_reports_all_or_nothing() {
        use crate::aggregator::Aggregator;
        use crate::parser::SuiteReport;
        use crate::utils::config::SuiteKinds;

        let mut aggregator = Aggregator::new(&SuiteKinds::default());
        aggregator.add(
            "unit",
            &SuiteReport {
                tests: 1,
                ..SuiteReport::default()
            },
        );
        let result = aggregator.finish(chrono::Utc::now()).unwrap();

        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp_dir.path().join(SUMMARY_FILE_NAME)).unwrap();

        assert!(write_reports(&result, temp_dir.path()).is_err());
        assert!(!temp_dir.path().join(METRICS_FILE_NAME).exists());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }
}
