//! JSON schema of `summary.json`.
//!
//! Field order is the on-disk key order. Fractional values are written as
//! fixed-point numbers with four decimals.

use super::format_decimal;
use crate::aggregator::AggregationResult;
use chrono::SecondsFormat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

/// Float that serializes as a JSON number with exactly four decimals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Fixed4(pub f64);

impl Serialize for Fixed4 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(format_decimal(self.0)).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Fixed4 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Fixed4)
    }
}

/// Top-level summary document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDocument {
    /// ISO 8601 UTC timestamp of the run
    pub generated_at: String,

    pub totals: SummaryTotals,

    /// One entry per kind, in kind-set order
    pub suites: Vec<SuiteSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub tests: u64,
    pub duration_seconds: Fixed4,
}

/// Row for a single pyramid kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteSummary {
    pub kind: String,
    pub tests: u64,
    pub tests_percentage: Fixed4,
    pub failures: u64,
    pub skipped: u64,
    pub duration_seconds: Fixed4,
    pub duration_percentage: Fixed4,
}

impl SummaryDocument {
    pub fn from_result(result: &AggregationResult) -> Self {
        let suites = result
            .kinds()
            .iter()
            .map(|row| SuiteSummary {
                kind: row.kind.clone(),
                tests: row.tests,
                tests_percentage: Fixed4(result.tests_percentage(row)),
                failures: row.failures,
                skipped: row.skipped,
                duration_seconds: Fixed4(row.duration_seconds),
                duration_percentage: Fixed4(result.duration_percentage(row)),
            })
            .collect();

        Self {
            generated_at: result
                .generated_at()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            totals: SummaryTotals {
                tests: result.total_tests(),
                duration_seconds: Fixed4(result.total_duration_seconds()),
            },
            suites,
        }
    }
}
