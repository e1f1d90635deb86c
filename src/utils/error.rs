//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a JUnit XML report
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed XML: {0}")]
    Malformed(String),

    #[error("DOCTYPE declarations are not allowed in test reports")]
    DoctypeForbidden,
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        ParseError::Malformed(err.to_string())
    }
}

/// Errors that abort an aggregation run
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error(
        "No JUnit XML reports were found. Run the test suites (e.g. unit, integration, contract) \
         so that build/test-results/<suite>/TEST-*.xml exists, then collect again."
    )]
    NoReports,

    #[error("Total duration of kind '{kind}' is not a finite number of seconds")]
    NonFiniteDuration { kind: String },

    #[error("Failed to parse report {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Suite '{0}' is mapped more than once")]
    DuplicateSuite(String),

    #[error("At least one suite-to-kind mapping is required")]
    EmptySuiteKinds,

    #[error("Invalid suite mapping '{0}': expected SUITE=KIND")]
    InvalidMapping(String),
}
