//! Decide whether a candidate file is a report we aggregate, and of which kind.
//!
//! The suite identifier is the directory right after the results marker,
//! e.g. `service/build/test-results/integrationTest/TEST-Foo.xml` belongs to
//! suite `integrationTest`.

use super::schema::ReportFile;
use crate::utils::config::{SuiteKinds, REPORT_EXTENSION, REPORT_PREFIX};
use std::path::Path;

/// Why a candidate file contributes nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Name is not `TEST-*.xml`
    NotAReport,
    /// Path has no marker, or nothing after the suite segment
    NoSuiteSegment,
    /// Suite identifier is not in the mapping
    UnknownSuite(String),
}

/// Per-file classification outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Skip(SkipReason),
    Matched(ReportFile),
}

/// Path rendered with forward slashes regardless of host
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// `TEST-*.xml` file name check
pub fn is_report_file(path: &Path) -> bool {
    let name_matches = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with(REPORT_PREFIX))
        .unwrap_or(false);

    name_matches && path.extension().and_then(|ext| ext.to_str()) == Some(REPORT_EXTENSION)
}

/// Segment following the first occurrence of `marker` in a normalized path
pub fn extract_suite_id<'a>(normalized: &'a str, marker: &str) -> Option<&'a str> {
    let start = normalized.find(marker)? + marker.len();
    let rest = &normalized[start..];
    let end = rest.find('/')?;

    match &rest[..end] {
        "" => None,
        suite => Some(suite),
    }
}

/// Resolve the suite kind of one candidate file
///
/// **Public** - first stage of every aggregation run
pub fn classify(path: &Path, kinds: &SuiteKinds, marker: &str) -> Classification {
    if !is_report_file(path) {
        return Classification::Skip(SkipReason::NotAReport);
    }

    let normalized = normalize_path(path);
    let Some(suite_id) = extract_suite_id(&normalized, marker) else {
        return Classification::Skip(SkipReason::NoSuiteSegment);
    };

    match kinds.kind_of(suite_id) {
        Some(kind) => Classification::Matched(ReportFile {
            path: path.to_path_buf(),
            suite_id: suite_id.to_string(),
            kind: kind.to_string(),
        }),
        None => Classification::Skip(SkipReason::UnknownSuite(suite_id.to_string())),
    }
}
