//! Prometheus text exposition output writer.
//!
//! Every metric is a gauge. Per-kind families carry a `kind` label; the
//! totals and the last-update timestamp are unlabelled.

use super::{format_decimal, validate_path};
use crate::aggregator::{AggregationResult, KindAggregate};
use crate::utils::error::OutputError;
use log::info;
use std::fmt::Write as _;
use std::path::Path;

pub const TESTS_COUNT: &str = "test_pyramid_tests_count";
pub const TESTS_PERCENTAGE: &str = "test_pyramid_tests_percentage";
pub const DURATION_SECONDS: &str = "test_pyramid_duration_seconds";
pub const DURATION_PERCENTAGE: &str = "test_pyramid_duration_percentage";
pub const FAILURES_COUNT: &str = "test_pyramid_failures_count";
pub const SKIPPED_COUNT: &str = "test_pyramid_skipped_count";
pub const TOTAL_TESTS: &str = "test_pyramid_total_tests";
pub const TOTAL_DURATION_SECONDS: &str = "test_pyramid_total_duration_seconds";
pub const LAST_UPDATE_UNIX_SECONDS: &str = "test_pyramid_last_update_unix_seconds";

type KindValue = fn(&AggregationResult, &KindAggregate) -> String;

/// Per-kind families in output order
const KIND_FAMILIES: &[(&str, &str, KindValue)] = &[
    (TESTS_COUNT, "Executed tests grouped by test pyramid kind.", tests_count),
    (TESTS_PERCENTAGE, "Percentage of tests grouped by test pyramid kind.", tests_percentage),
    (DURATION_SECONDS, "Total test execution time grouped by test pyramid kind.", duration_seconds),
    (DURATION_PERCENTAGE, "Percentage of execution time grouped by test pyramid kind.", duration_percentage),
    (FAILURES_COUNT, "Failed tests grouped by test pyramid kind.", failures_count),
    (SKIPPED_COUNT, "Skipped tests grouped by test pyramid kind.", skipped_count),
];

fn tests_count(_: &AggregationResult, row: &KindAggregate) -> String {
    row.tests.to_string()
}

fn tests_percentage(result: &AggregationResult, row: &KindAggregate) -> String {
    format_decimal(result.tests_percentage(row))
}

fn duration_seconds(_: &AggregationResult, row: &KindAggregate) -> String {
    format_decimal(row.duration_seconds)
}

fn duration_percentage(result: &AggregationResult, row: &KindAggregate) -> String {
    format_decimal(result.duration_percentage(row))
}

fn failures_count(_: &AggregationResult, row: &KindAggregate) -> String {
    row.failures.to_string()
}

fn skipped_count(_: &AggregationResult, row: &KindAggregate) -> String {
    row.skipped.to_string()
}

/// Render the exposition document
///
/// **Public** - pure function of the result
pub fn render_metrics(result: &AggregationResult) -> String {
    let mut families: Vec<String> = Vec::new();

    for (name, help, value) in KIND_FAMILIES {
        let mut family = family_header(name, help);
        for row in result.kinds() {
            let _ = writeln!(
                family,
                "{}{{kind=\"{}\"}} {}",
                name,
                escape_label_value(&row.kind),
                value(result, row)
            );
        }
        families.push(family);
    }

    let totals = [
        (
            TOTAL_TESTS,
            "Total number of executed tests.",
            result.total_tests().to_string(),
        ),
        (
            TOTAL_DURATION_SECONDS,
            "Total execution time across all tests.",
            format_decimal(result.total_duration_seconds()),
        ),
        (
            LAST_UPDATE_UNIX_SECONDS,
            "Unix epoch time for latest metrics generation.",
            result.generated_at().timestamp().to_string(),
        ),
    ];

    for (name, help, value) in totals {
        let mut family = family_header(name, help);
        let _ = writeln!(family, "{} {}", name, value);
        families.push(family);
    }

    families.join("\n")
}

/// Write the exposition document to a file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is empty or a directory
pub fn write_metrics(
    result: &AggregationResult,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    validate_path(output_path)?;

    std::fs::write(output_path, render_metrics(result))?;

    info!("Wrote test pyramid metrics to {}", output_path.display());
    Ok(())
}

fn family_header(name: &str, help: &str) -> String {
    format!("# HELP {} {}\n# TYPE {} gauge\n", name, help, name)
}

/// Escape a label value for the text exposition format
pub fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}
