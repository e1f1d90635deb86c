use crate::aggregator::MalformedPolicy;
use crate::utils::config::{
    FileConfig, SuiteKinds, DEFAULT_OUTPUT_DIR, RESULTS_MARKER,
};
use crate::utils::error::ConfigError;
use std::path::PathBuf;

/// Effective settings after merging CLI flags, config file and defaults
#[derive(Debug, Clone)]
pub struct Settings {
    pub suite_kinds: SuiteKinds,

    /// Path fragment preceding the suite directory
    pub marker: String,

    pub output_dir: PathBuf,

    pub on_malformed: MalformedPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            suite_kinds: SuiteKinds::default(),
            marker: RESULTS_MARKER.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            on_malformed: MalformedPolicy::Fail,
        }
    }
}

impl Settings {
    /// Resolve with precedence CLI > config file > defaults
    ///
    /// `suites` are raw `SUITE=KIND` flags; when given they replace the
    /// mapping from the config file entirely.
    pub fn resolve(
        config: Option<&FileConfig>,
        suites: &[String],
        output: Option<PathBuf>,
        skip_malformed: bool,
    ) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let suite_kinds = if !suites.is_empty() {
            SuiteKinds::parse_pairs(suites)?
        } else {
            match config {
                Some(config) => config.suite_kinds()?.unwrap_or(defaults.suite_kinds),
                None => defaults.suite_kinds,
            }
        };

        let marker = config
            .and_then(|c| c.marker.clone())
            .unwrap_or(defaults.marker);

        let output_dir = output
            .or_else(|| config.and_then(|c| c.output_dir.clone()))
            .unwrap_or(defaults.output_dir);

        let skip = skip_malformed || config.and_then(|c| c.skip_malformed).unwrap_or(false);

        Ok(Self {
            suite_kinds,
            marker,
            output_dir,
            on_malformed: if skip {
                MalformedPolicy::Skip
            } else {
                MalformedPolicy::Fail
            },
        })
    }
}

/// Arguments for the collect command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct CollectArgs {
    /// Directory searched for reports
    pub root: PathBuf,

    /// Explicit report globs; empty means discover per configured suite
    pub report_patterns: Vec<String>,

    pub settings: Settings,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for CollectArgs {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            report_patterns: Vec::new(),
            settings: Settings::default(),
            print_summary: false,
        }
    }
}

/// Arguments for the clean command
#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub root: PathBuf,
    pub suite_kinds: SuiteKinds,
    pub marker: String,

    /// Only list what would be deleted
    pub dry_run: bool,
}

impl Default for CleanArgs {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            suite_kinds: SuiteKinds::default(),
            marker: RESULTS_MARKER.to_string(),
            dry_run: false,
        }
    }
}
