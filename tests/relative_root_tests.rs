//! Runs in its own test binary: it changes the process working directory.

use std::fs;
use std::path::PathBuf;
use test_pyramid::commands::{discover_reports, execute_collect, CollectArgs};
use test_pyramid::utils::config::SUMMARY_FILE_NAME;

#[test]
fn test_collect_from_relative_root_of_single_module_project() {
    let temp_dir = tempfile::tempdir().unwrap();
    let report = temp_dir.path().join("build/test-results/test/TEST-A.xml");
    fs::create_dir_all(report.parent().unwrap()).unwrap();
    fs::write(
        &report,
        r#"<testsuite name="A" tests="3" failures="0" errors="0" skipped="0" time="0.3"/>"#,
    )
    .unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    let args = CollectArgs {
        root: PathBuf::from("."),
        ..CollectArgs::default()
    };
    let discovered = discover_reports(&args);
    let outcome = execute_collect(args);

    std::env::set_current_dir(previous).unwrap();

    let discovered = discovered.unwrap();
    assert_eq!(discovered.len(), 1);
    assert!(discovered[0].is_relative());

    let outcome = outcome.unwrap();
    assert_eq!(outcome.collection.result.total_tests(), 3);
    assert_eq!(outcome.collection.result.kind("unit").unwrap().tests, 3);
    assert!(temp_dir
        .path()
        .join("build/reports/test-pyramid")
        .join(SUMMARY_FILE_NAME)
        .exists());
}
