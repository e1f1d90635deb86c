//! Per-kind accumulation of suite contributions.

use super::metrics::{AggregationResult, KindAggregate};
use crate::parser::schema::SuiteReport;
use crate::utils::config::SuiteKinds;
use crate::utils::error::AggregateError;
use chrono::{DateTime, Utc};
use log::debug;

/// Single-writer accumulator for one run
///
/// Every kind of the mapping starts at zero so kinds without reports still
/// show up in the output.
#[derive(Debug, Clone)]
pub struct Aggregator {
    rows: Vec<KindAggregate>,
}

impl Aggregator {
    pub fn new(kinds: &SuiteKinds) -> Self {
        Self {
            rows: kinds.kinds().into_iter().map(KindAggregate::new).collect(),
        }
    }

    /// Add one suite contribution to `kind`
    ///
    /// Returns false when `kind` is not part of the kind set.
    pub fn add(&mut self, kind: &str, suite: &SuiteReport) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.kind == kind) else {
            debug!("Ignoring contribution for unregistered kind '{}'", kind);
            return false;
        };

        row.tests = row.tests.saturating_add(suite.tests);
        row.failures = row.failures.saturating_add(suite.failures);
        row.skipped = row.skipped.saturating_add(suite.skipped);
        row.duration_seconds += suite.duration_seconds;
        true
    }

    /// Tests counted so far, across all kinds
    pub fn observed_tests(&self) -> u64 {
        self.rows.iter().map(|row| row.tests).sum()
    }

    /// Finalize the run
    ///
    /// # Errors
    /// * `AggregateError::NoReports` - no test was counted for any kind
    /// * `AggregateError::NonFiniteDuration` - a duration sum overflowed
    pub fn finish(self, generated_at: DateTime<Utc>) -> Result<AggregationResult, AggregateError> {
        if self.observed_tests() == 0 {
            return Err(AggregateError::NoReports);
        }

        if let Some(row) = self.rows.iter().find(|row| !row.duration_seconds.is_finite()) {
            return Err(AggregateError::NonFiniteDuration {
                kind: row.kind.clone(),
            });
        }

        let result = AggregationResult::new(self.rows, generated_at);
        if !result.total_duration_seconds().is_finite() {
            return Err(AggregateError::NonFiniteDuration {
                kind: "total".to_string(),
            });
        }

        Ok(result)
    }
}
