//! Data carried from a parsed report into aggregation.

use std::path::PathBuf;

/// Contribution of one `<testsuite>` element.
///
/// `failures` already folds in the element's `errors` attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteReport {
    /// `name` attribute, shown in debug logs
    pub name: Option<String>,
    pub tests: u64,
    pub failures: u64,
    pub skipped: u64,
    pub duration_seconds: f64,
}

/// A report file whose suite identifier resolved to a pyramid kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub path: PathBuf,
    pub suite_id: String,
    pub kind: String,
}
