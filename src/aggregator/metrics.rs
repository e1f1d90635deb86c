//! Finalized aggregation results and derived percentages.

use chrono::{DateTime, Utc};

/// Share of `part` in `total`, as a percentage
///
/// Returns 0.0 instead of NaN when nothing was observed.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        (part / total) * 100.0
    }
}

/// Totals for one pyramid kind
#[derive(Debug, Clone, PartialEq)]
pub struct KindAggregate {
    pub kind: String,
    pub tests: u64,
    pub failures: u64,
    pub skipped: u64,
    pub duration_seconds: f64,
}

impl KindAggregate {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            tests: 0,
            failures: 0,
            skipped: 0,
            duration_seconds: 0.0,
        }
    }
}

/// Immutable outcome of one aggregation run
///
/// **Public** - consumed by both renderers
///
/// Built only by [`super::Aggregator::finish`], which guarantees the totals
/// are the sums of the per-kind rows.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    kinds: Vec<KindAggregate>,
    total_tests: u64,
    total_duration_seconds: f64,
    generated_at: DateTime<Utc>,
}

impl AggregationResult {
    pub(crate) fn new(kinds: Vec<KindAggregate>, generated_at: DateTime<Utc>) -> Self {
        let total_tests = kinds.iter().map(|k| k.tests).sum();
        let total_duration_seconds = kinds.iter().map(|k| k.duration_seconds).sum();

        Self {
            kinds,
            total_tests,
            total_duration_seconds,
            generated_at,
        }
    }

    /// Per-kind rows in kind-set order
    pub fn kinds(&self) -> &[KindAggregate] {
        &self.kinds
    }

    pub fn kind(&self, kind: &str) -> Option<&KindAggregate> {
        self.kinds.iter().find(|k| k.kind == kind)
    }

    pub fn total_tests(&self) -> u64 {
        self.total_tests
    }

    pub fn total_duration_seconds(&self) -> f64 {
        self.total_duration_seconds
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn tests_percentage(&self, row: &KindAggregate) -> f64 {
        percentage(row.tests as f64, self.total_tests as f64)
    }

    pub fn duration_percentage(&self, row: &KindAggregate) -> f64 {
        percentage(row.duration_seconds, self.total_duration_seconds)
    }

    pub fn total_failures(&self) -> u64 {
        self.kinds.iter().map(|k| k.failures).sum()
    }

    pub fn total_skipped(&self) -> u64 {
        self.kinds.iter().map(|k| k.skipped).sum()
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        let rows: Vec<String> = self
            .kinds
            .iter()
            .map(|k| format!("{} {} ({:.1}%)", k.kind, k.tests, self.tests_percentage(k)))
            .collect();

        format!(
            "Total: {} tests in {:.2}s | {}",
            self.total_tests,
            self.total_duration_seconds,
            rows.join(" | ")
        )
    }
}
