//! One complete aggregation run over a resolved file set.
//!
//! The run:
//! 1. Sorts candidates by normalized path
//! 2. Classifies each file by suite kind
//! 3. Parses matched reports
//! 4. Accumulates per kind
//! 5. Finalizes totals

use super::accumulator::Aggregator;
use super::metrics::AggregationResult;
use crate::parser::{classify, normalize_path, parse_report_file, Classification, SkipReason};
use crate::utils::config::{SuiteKinds, RESULTS_MARKER};
use crate::utils::error::AggregateError;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// What to do with a report that cannot be read or parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Abort the run on the first bad report
    #[default]
    Fail,
    /// Warn and continue without it
    Skip,
}

/// Options for an aggregation run
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Path fragment preceding the suite directory
    pub marker: String,

    pub on_malformed: MalformedPolicy,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            marker: RESULTS_MARKER.to_string(),
            on_malformed: MalformedPolicy::default(),
        }
    }
}

/// Bookkeeping for one run; not part of the artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub files_scanned: usize,
    pub files_ignored: usize,
    pub files_matched: usize,
    pub files_failed: usize,
    pub suites_consumed: usize,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct Collection {
    pub result: AggregationResult,
    pub stats: RunStats,
}

/// Aggregate a set of candidate report files, stamped with the current time
///
/// **Public** - main entry point for aggregation
///
/// # Errors
/// * `AggregateError::NoReports` - no tests were found in any matched report
/// * `AggregateError::Report` - a matched report is unreadable or malformed
///   and the policy is `MalformedPolicy::Fail`
pub fn aggregate_reports<P: AsRef<Path>>(
    paths: &[P],
    kinds: &SuiteKinds,
    options: &CollectOptions,
) -> Result<Collection, AggregateError> {
    aggregate_reports_at(paths, kinds, options, Utc::now())
}

/// Same as [`aggregate_reports`] with an explicit generation time
pub fn aggregate_reports_at<P: AsRef<Path>>(
    paths: &[P],
    kinds: &SuiteKinds,
    options: &CollectOptions,
    generated_at: DateTime<Utc>,
) -> Result<Collection, AggregateError> {
    let candidates = sorted_candidates(paths);
    let mut stats = RunStats {
        files_scanned: candidates.len(),
        ..RunStats::default()
    };
    let mut aggregator = Aggregator::new(kinds);

    for (_, path) in &candidates {
        let report = match classify(path, kinds, &options.marker) {
            Classification::Matched(report) => report,
            Classification::Skip(reason) => {
                log_skip(path, &reason);
                stats.files_ignored += 1;
                continue;
            }
        };

        if !path.is_file() {
            debug!("Skipping {}: not a regular file", path.display());
            stats.files_ignored += 1;
            continue;
        }

        stats.files_matched += 1;

        let suites = match parse_report_file(path) {
            Ok(suites) => suites,
            Err(source) => match options.on_malformed {
                MalformedPolicy::Fail => {
                    return Err(AggregateError::Report {
                        path: path.clone(),
                        source,
                    })
                }
                MalformedPolicy::Skip => {
                    warn!("Skipping unparseable report {}: {}", path.display(), source);
                    stats.files_failed += 1;
                    continue;
                }
            },
        };

        for suite in &suites {
            aggregator.add(&report.kind, suite);
        }
        stats.suites_consumed += suites.len();
    }

    info!(
        "Scanned {} file(s): {} matched, {} ignored, {} failed, {} suite(s) consumed",
        stats.files_scanned,
        stats.files_matched,
        stats.files_ignored,
        stats.files_failed,
        stats.suites_consumed
    );

    let result = aggregator.finish(generated_at)?;
    info!("{}", result.summary());

    Ok(Collection { result, stats })
}

/// Deduplicated candidates keyed and ordered by normalized absolute path
///
/// **Private** - ordering makes output reproducible
///
/// Relative paths are resolved against the working directory first, so a
/// report at `build/test-results/<suite>/` still carries the leading `/` of
/// the marker.
fn sorted_candidates<P: AsRef<Path>>(paths: &[P]) -> Vec<(String, PathBuf)> {
    let mut candidates: Vec<(String, PathBuf)> = paths
        .iter()
        .map(|p| {
            let path = absolute_path(p.as_ref());
            (normalize_path(&path), path)
        })
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0));
    candidates.dedup_by(|a, b| a.0 == b.0);
    candidates
}

fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|e| {
        debug!("Cannot resolve {}: {}", path.display(), e);
        path.to_path_buf()
    })
}

fn log_skip(path: &Path, reason: &SkipReason) {
    match reason {
        SkipReason::NotAReport => debug!("Skipping {}: not a TEST-*.xml report", path.display()),
        SkipReason::NoSuiteSegment => {
            debug!("Skipping {}: no suite directory in path", path.display())
        }
        SkipReason::UnknownSuite(suite) => {
            debug!("Skipping {}: suite '{}' is not mapped", path.display(), suite)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_candidates_dedup() {
        let paths = vec![
            PathBuf::from("b/build/test-results/test/TEST-B.xml"),
            PathBuf::from("a/build/test-results/test/TEST-A.xml"),
            PathBuf::from("b/build/test-results/test/TEST-B.xml"),
        ];

        let sorted: Vec<String> = sorted_candidates(&paths).into_iter().map(|(k, _)| k).collect();
        assert_eq!(sorted.len(), 2);
        assert!(sorted[0].ends_with("/a/build/test-results/test/TEST-A.xml"));
        assert!(sorted[1].ends_with("/b/build/test-results/test/TEST-B.xml"));
    }

    #[test]
    fn test_relative_candidates_are_classified() {
        let paths = vec![PathBuf::from("build/test-results/test/TEST-A.xml")];
        let (_, path) = sorted_candidates(&paths).remove(0);

        assert!(path.is_absolute());
        assert!(matches!(
            classify(&path, &SuiteKinds::default(), RESULTS_MARKER),
            Classification::Matched(report) if report.suite_id == "test"
        ));
    }

    #[test]
    fn test_no_candidates_is_no_reports() {
        let paths: Vec<PathBuf> = Vec::new();
        let result = aggregate_reports(&paths, &SuiteKinds::default(), &CollectOptions::default());
        assert!(matches!(result, Err(AggregateError::NoReports)));
    }
}
