//! Configuration and constants for the CLI.
//!
//! Effective settings are resolved with the precedence
//! CLI flags > config file > the defaults below.

use super::error::ConfigError;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Path fragment that precedes the suite directory of a JUnit report
pub const RESULTS_MARKER: &str = "/build/test-results/";

/// JUnit report files are named `TEST-<class>.xml`
pub const REPORT_PREFIX: &str = "TEST-";
pub const REPORT_EXTENSION: &str = "xml";

/// Artifact file names written to the output directory
pub const SUMMARY_FILE_NAME: &str = "summary.json";
pub const METRICS_FILE_NAME: &str = "test-pyramid.prom";

pub const DEFAULT_OUTPUT_DIR: &str = "build/reports/test-pyramid";

/// Suite task -> pyramid kind, in report order
pub const DEFAULT_SUITE_KINDS: &[(&str, &str)] = &[
    ("test", "unit"),
    ("integrationTest", "integration"),
    ("contractTest", "contract"),
    ("e2eTest", "e2e"),
];

/// Ordered mapping from suite identifier to pyramid kind.
///
/// The kind set is the distinct kind values in first-appearance order;
/// it fixes the row order of every report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteKinds {
    entries: Vec<(String, String)>,
}

impl SuiteKinds {
    /// Build a mapping, rejecting duplicate suite identifiers and blank names
    pub fn new<I, S, K>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, K)>,
        S: Into<String>,
        K: Into<String>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();

        for (suite, kind) in pairs {
            let suite = suite.into().trim().to_string();
            let kind = kind.into().trim().to_string();

            if suite.is_empty() || kind.is_empty() || suite.contains('/') {
                return Err(ConfigError::InvalidMapping(format!("{}={}", suite, kind)));
            }
            if entries.iter().any(|(existing, _)| *existing == suite) {
                return Err(ConfigError::DuplicateSuite(suite));
            }

            entries.push((suite, kind));
        }

        if entries.is_empty() {
            return Err(ConfigError::EmptySuiteKinds);
        }

        Ok(Self { entries })
    }

    /// Parse `SUITE=KIND` pairs as given on the command line
    pub fn parse_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self, ConfigError> {
        let parsed = pairs
            .iter()
            .map(|raw| parse_mapping(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(parsed)
    }

    /// Kind assigned to a suite identifier, if the suite is known
    pub fn kind_of(&self, suite_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(suite, _)| suite == suite_id)
            .map(|(_, kind)| kind.as_str())
    }

    pub fn suite_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(suite, _)| suite.as_str())
    }

    /// Distinct kinds in first-appearance order
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = Vec::new();
        for (_, kind) in &self.entries {
            if !kinds.contains(&kind.as_str()) {
                kinds.push(kind.as_str());
            }
        }
        kinds
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SuiteKinds {
    fn default() -> Self {
        Self {
            entries: DEFAULT_SUITE_KINDS
                .iter()
                .map(|(suite, kind)| (suite.to_string(), kind.to_string()))
                .collect(),
        }
    }
}

/// Split a `SUITE=KIND` argument
pub fn parse_mapping(raw: &str) -> Result<(String, String), ConfigError> {
    let (suite, kind) = raw
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidMapping(raw.to_string()))?;

    let suite = suite.trim();
    let kind = kind.trim();
    if suite.is_empty() || kind.is_empty() {
        return Err(ConfigError::InvalidMapping(raw.to_string()));
    }

    Ok((suite.to_string(), kind.to_string()))
}

/// One `[[suites]]` entry of the config file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SuiteEntry {
    pub id: String,
    pub kind: String,
}

/// Optional TOML configuration file
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub output_dir: Option<PathBuf>,
    pub marker: Option<String>,
    pub skip_malformed: Option<bool>,
    #[serde(default)]
    pub suites: Vec<SuiteEntry>,
}

impl FileConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Suite mapping declared in the file, `None` when the file declares none
    pub fn suite_kinds(&self) -> Result<Option<SuiteKinds>, ConfigError> {
        if self.suites.is_empty() {
            return Ok(None);
        }

        SuiteKinds::new(
            self.suites
                .iter()
                .map(|entry| (entry.id.clone(), entry.kind.clone())),
        )
        .map(Some)
    }
}
