use chrono::{TimeZone, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use test_pyramid::aggregator::{
    aggregate_reports, aggregate_reports_at, CollectOptions, MalformedPolicy,
};
use test_pyramid::output::{render_metrics, render_summary};
use test_pyramid::utils::config::SuiteKinds;
use test_pyramid::utils::error::AggregateError;

fn write_report(root: &Path, relative: &str, xml: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, xml).unwrap();
    path
}

fn suite_xml(tests: u64, failures: u64, errors: u64, skipped: u64, time: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="Sample" tests="{}" failures="{}" errors="{}" skipped="{}" time="{}"/>"#,
        tests, failures, errors, skipped, time
    )
}

#[test]
fn test_single_report_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(
        dir.path(),
        "svc/build/test-results/test/TEST-Foo.xml",
        &suite_xml(3, 0, 0, 0, "0.75"),
    );
    let kinds = SuiteKinds::new([("test", "unit")]).unwrap();

    let collection = aggregate_reports(&[report], &kinds, &CollectOptions::default()).unwrap();
    let result = collection.result;

    assert_eq!(result.kinds().len(), 1);
    let unit = result.kind("unit").unwrap();
    assert_eq!(unit.tests, 3);
    assert_eq!(unit.failures, 0);
    assert_eq!(unit.skipped, 0);
    assert_eq!(unit.duration_seconds, 0.75);
    assert_eq!(result.tests_percentage(unit), 100.0);

    let summary = render_summary(&result).unwrap();
    assert!(summary.contains("\"durationSeconds\": 0.7500"));
    assert!(summary.contains("\"testsPercentage\": 100.0000"));
}

#[test]
fn test_failures_include_errors() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(
        dir.path(),
        "svc/build/test-results/test/TEST-Foo.xml",
        &suite_xml(5, 1, 1, 0, "2.5"),
    );

    let collection =
        aggregate_reports(&[report], &SuiteKinds::default(), &CollectOptions::default()).unwrap();
    let unit = collection.result.kind("unit").unwrap().clone();

    assert_eq!(unit.tests, 5);
    assert_eq!(unit.failures, 2);
    assert_eq!(unit.skipped, 0);
    assert_eq!(unit.duration_seconds, 2.5);
}

#[test]
fn test_collection_root_children_add_up() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(
        dir.path(),
        "svc/build/test-results/integrationTest/TEST-All.xml",
        r#"<testsuites>
  <testsuite name="A" tests="2" time="0.5"/>
  <testsuite name="B" tests="4" time="1.0"/>
</testsuites>"#,
    );

    let collection =
        aggregate_reports(&[report], &SuiteKinds::default(), &CollectOptions::default()).unwrap();

    assert_eq!(collection.result.kind("integration").unwrap().tests, 6);
    assert_eq!(collection.stats.suites_consumed, 2);
}

#[test]
fn test_no_files_fails_with_no_reports() {
    let files: Vec<PathBuf> = Vec::new();
    let err = aggregate_reports(&files, &SuiteKinds::default(), &CollectOptions::default())
        .unwrap_err();

    assert!(matches!(err, AggregateError::NoReports));
    assert!(err.to_string().contains("Run the test suites"));
}

#[test]
fn test_path_without_marker_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let stray = write_report(dir.path(), "tmp/TEST-Stray.xml", &suite_xml(50, 0, 0, 0, "9"));
    let valid = write_report(
        dir.path(),
        "svc/build/test-results/test/TEST-Foo.xml",
        &suite_xml(2, 0, 0, 0, "1"),
    );

    let collection = aggregate_reports(
        &[stray, valid],
        &SuiteKinds::default(),
        &CollectOptions::default(),
    )
    .unwrap();

    assert_eq!(collection.result.total_tests(), 2);
    assert_eq!(collection.stats.files_ignored, 1);
    assert_eq!(collection.stats.files_matched, 1);
}

#[test]
fn test_unmapped_suite_and_non_report_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![
        write_report(
            dir.path(),
            "svc/build/test-results/jmh/TEST-Bench.xml",
            &suite_xml(10, 0, 0, 0, "1"),
        ),
        write_report(
            dir.path(),
            "svc/build/test-results/test/binary/output.bin",
            "not xml",
        ),
        write_report(
            dir.path(),
            "svc/build/test-results/contractTest/TEST-Pact.xml",
            &suite_xml(1, 0, 0, 0, "0.2"),
        ),
    ];

    let collection =
        aggregate_reports(&files, &SuiteKinds::default(), &CollectOptions::default()).unwrap();

    assert_eq!(collection.result.total_tests(), 1);
    assert_eq!(collection.result.kind("contract").unwrap().tests, 1);
    assert_eq!(collection.stats.files_ignored, 2);
}

#[test]
fn test_unobserved_kinds_present_with_zero_percentages() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(
        dir.path(),
        "svc/build/test-results/test/TEST-Foo.xml",
        &suite_xml(4, 0, 0, 0, "0"),
    );

    let collection =
        aggregate_reports(&[report], &SuiteKinds::default(), &CollectOptions::default()).unwrap();
    let result = collection.result;

    let kinds: Vec<&str> = result.kinds().iter().map(|k| k.kind.as_str()).collect();
    assert_eq!(kinds, vec!["unit", "integration", "contract", "e2e"]);

    for row in result.kinds() {
        // total duration is zero, so every duration share must be 0 rather than NaN
        assert_eq!(result.duration_percentage(row), 0.0);
        if row.kind != "unit" {
            assert_eq!(row.tests, 0);
            assert_eq!(result.tests_percentage(row), 0.0);
        }
    }

    assert!(!render_metrics(&result).contains("NaN"));
}

#[test]
fn test_totals_match_row_sums() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![
        write_report(dir.path(), "a/build/test-results/test/TEST-1.xml", &suite_xml(7, 1, 0, 1, "0.1")),
        write_report(dir.path(), "a/build/test-results/integrationTest/TEST-2.xml", &suite_xml(3, 0, 2, 0, "1.7")),
        write_report(dir.path(), "b/build/test-results/e2eTest/TEST-3.xml", &suite_xml(1, 0, 0, 0, "12.25")),
        write_report(dir.path(), "b/build/test-results/test/TEST-4.xml", &suite_xml(9, 0, 0, 2, "0.3")),
    ];

    let result = aggregate_reports(&files, &SuiteKinds::default(), &CollectOptions::default())
        .unwrap()
        .result;

    let tests: u64 = result.kinds().iter().map(|k| k.tests).sum();
    let duration: f64 = result.kinds().iter().map(|k| k.duration_seconds).sum();
    assert_eq!(tests, result.total_tests());
    assert!((duration - result.total_duration_seconds()).abs() < 1e-9);
    assert_eq!(result.total_tests(), 20);
    assert_eq!(result.kind("unit").unwrap().tests, 16);
    assert_eq!(result.kind("integration").unwrap().failures, 2);
}

#[test]
fn test_identical_input_renders_identically() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = vec![
        write_report(dir.path(), "z/build/test-results/test/TEST-Z.xml", &suite_xml(1, 0, 0, 0, "0.1")),
        write_report(dir.path(), "a/build/test-results/test/TEST-A.xml", &suite_xml(2, 0, 0, 0, "0.2")),
        write_report(dir.path(), "m/build/test-results/contractTest/TEST-M.xml", &suite_xml(3, 0, 0, 0, "0.3")),
    ];
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
    let kinds = SuiteKinds::default();
    let options = CollectOptions::default();

    let first = aggregate_reports_at(&files, &kinds, &options, at).unwrap().result;
    files.reverse();
    let second = aggregate_reports_at(&files, &kinds, &options, at).unwrap().result;

    assert_eq!(render_summary(&first).unwrap(), render_summary(&second).unwrap());
    assert_eq!(render_metrics(&first), render_metrics(&second));
}

#[test]
fn test_malformed_report_fails_run_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let broken = write_report(
        dir.path(),
        "svc/build/test-results/test/TEST-Broken.xml",
        "<testsuite tests=\"3\"><testcase></testsuite>",
    );
    let valid = write_report(
        dir.path(),
        "svc/build/test-results/test/TEST-Valid.xml",
        &suite_xml(2, 0, 0, 0, "1"),
    );

    let err = aggregate_reports(
        &[broken.clone(), valid],
        &SuiteKinds::default(),
        &CollectOptions::default(),
    )
    .unwrap_err();

    match err {
        AggregateError::Report { path, .. } => assert_eq!(path, broken),
        other => panic!("expected report error, got {:?}", other),
    }
}

#[test]
fn test_malformed_report_skipped_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    let broken = write_report(
        dir.path(),
        "svc/build/test-results/test/TEST-Broken.xml",
        "<testsuite tests=\"3\">",
    );
    let valid = write_report(
        dir.path(),
        "svc/build/test-results/test/TEST-Valid.xml",
        &suite_xml(2, 0, 0, 0, "1"),
    );
    let options = CollectOptions {
        on_malformed: MalformedPolicy::Skip,
        ..CollectOptions::default()
    };

    let collection =
        aggregate_reports(&[broken, valid], &SuiteKinds::default(), &options).unwrap();

    assert_eq!(collection.result.total_tests(), 2);
    assert_eq!(collection.stats.files_failed, 1);
}

#[test]
fn test_doctype_report_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(
        dir.path(),
        "svc/build/test-results/test/TEST-Xxe.xml",
        r#"<?xml version="1.0"?>
<!DOCTYPE testsuite [<!ENTITY count SYSTEM "file:///etc/hostname">]>
<testsuite tests="&count;"/>"#,
    );

    let err = aggregate_reports(&[report], &SuiteKinds::default(), &CollectOptions::default())
        .unwrap_err();
    assert!(matches!(err, AggregateError::Report { .. }));
}

#[test]
fn test_custom_marker() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(
        dir.path(),
        "svc/target/surefire/unit/TEST-Foo.xml",
        &suite_xml(4, 0, 0, 0, "1"),
    );
    let kinds = SuiteKinds::new([("unit", "unit")]).unwrap();
    let options = CollectOptions {
        marker: "/target/surefire/".to_string(),
        ..CollectOptions::default()
    };

    let collection = aggregate_reports(&[report], &kinds, &options).unwrap();
    assert_eq!(collection.result.total_tests(), 4);
}

#[test]
fn test_overflowing_duration_fails_run() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![
        write_report(dir.path(), "svc/build/test-results/test/TEST-A.xml", &suite_xml(1, 0, 0, 0, "1e308")),
        write_report(dir.path(), "svc/build/test-results/test/TEST-B.xml", &suite_xml(1, 0, 0, 0, "1e308")),
    ];

    let err = aggregate_reports(&files, &SuiteKinds::default(), &CollectOptions::default())
        .unwrap_err();
    assert!(matches!(err, AggregateError::NonFiniteDuration { ref kind } if kind == "unit"));
}
