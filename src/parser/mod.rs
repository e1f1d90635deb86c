//! Report classification and JUnit XML parsing.
//!
//! This module handles:
//! - Recognizing report files and resolving their suite kind
//! - Reading `<testsuite>` / `<testsuites>` documents
//! - Defining the per-suite contribution type

pub mod classifier;
pub mod junit;
pub mod schema;

// Re-export main types
pub use classifier::{classify, extract_suite_id, is_report_file, normalize_path, Classification, SkipReason};
pub use junit::{parse_report, parse_report_bytes, parse_report_file};
pub use schema::{ReportFile, SuiteReport};
