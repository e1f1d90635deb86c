use crate::aggregator::AggregationResult;
use crate::output::{read_summary, SummaryDocument};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a summary JSON file
pub fn validate_summary_file(file_path: PathBuf) -> Result<SummaryDocument> {
    println!("Validating summary: {}", file_path.display());

    let summary = read_summary(&file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    check_summary(&summary)?;

    println!("✓ Valid summary JSON");
    println!("  Generated: {}", summary.generated_at);
    println!("  Total Tests: {}", summary.totals.tests);
    println!("  Total Duration: {:.4}s", summary.totals.duration_seconds.0);
    for suite in &summary.suites {
        println!(
            "  {}: {} tests ({:.2}%), {} failed, {} skipped",
            suite.kind, suite.tests, suite.tests_percentage.0, suite.failures, suite.skipped
        );
    }

    Ok(summary)
}

/// Consistency checks on a loaded summary
pub fn check_summary(summary: &SummaryDocument) -> Result<()> {
    let suite_tests: u64 = summary.suites.iter().map(|s| s.tests).sum();
    if suite_tests != summary.totals.tests {
        anyhow::bail!(
            "Suite tests add up to {} but totals.tests is {}",
            suite_tests,
            summary.totals.tests
        );
    }

    for suite in &summary.suites {
        for (field, value) in [
            ("testsPercentage", suite.tests_percentage.0),
            ("durationPercentage", suite.duration_percentage.0),
        ] {
            if !(0.0..=100.0).contains(&value) {
                anyhow::bail!("{} of '{}' is out of range: {}", field, suite.kind, value);
            }
        }
    }

    Ok(())
}

/// Text table printed by `collect --summary`
pub fn format_summary_table(result: &AggregationResult) -> String {
    let rule = "=".repeat(80);
    let mut lines = vec![
        rule.clone(),
        "TEST PYRAMID SUMMARY".to_string(),
        rule.clone(),
        format!(
            "{:<16} {:>8} {:>8} {:>8} {:>8} {:>12} {:>8}",
            "KIND", "TESTS", "TESTS%", "FAILED", "SKIPPED", "DURATION(s)", "TIME%"
        ),
    ];

    for row in result.kinds() {
        lines.push(format!(
            "{:<16} {:>8} {:>8.2} {:>8} {:>8} {:>12.4} {:>8.2}",
            row.kind,
            row.tests,
            result.tests_percentage(row),
            row.failures,
            row.skipped,
            row.duration_seconds,
            result.duration_percentage(row)
        ));
    }

    lines.push(format!(
        "{:<16} {:>8} {:>8} {:>8} {:>8} {:>12.4}",
        "TOTAL",
        result.total_tests(),
        "",
        result.total_failures(),
        result.total_skipped(),
        result.total_duration_seconds()
    ));
    lines.push(rule);

    lines.join("\n")
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Test Pyramid Report Schemas");
    println!();

    if show_details {
        println!("summary.json:");
        println!("  generatedAt: string            - ISO 8601 UTC timestamp");
        println!("  totals: object");
        println!("    tests: number                - Tests across all kinds");
        println!("    durationSeconds: number      - Execution time, 4 decimals");
        println!("  suites: array                  - One entry per kind, mapping order");
        println!("    kind: string                 - Pyramid kind (unit, integration, ...)");
        println!("    tests: number                - Executed tests");
        println!("    testsPercentage: number      - Share of all tests, 4 decimals");
        println!("    failures: number             - Failures plus errors");
        println!("    skipped: number              - Skipped tests");
        println!("    durationSeconds: number      - Execution time, 4 decimals");
        println!("    durationPercentage: number   - Share of total time, 4 decimals");
        println!();
        println!("test-pyramid.prom (all gauges):");
        println!("  test_pyramid_tests_count{{kind}}");
        println!("  test_pyramid_tests_percentage{{kind}}");
        println!("  test_pyramid_duration_seconds{{kind}}");
        println!("  test_pyramid_duration_percentage{{kind}}");
        println!("  test_pyramid_failures_count{{kind}}");
        println!("  test_pyramid_skipped_count{{kind}}");
        println!("  test_pyramid_total_tests");
        println!("  test_pyramid_total_duration_seconds");
        println!("  test_pyramid_last_update_unix_seconds");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Test Pyramid v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Aggregates JUnit XML reports into test pyramid metrics.");
}
