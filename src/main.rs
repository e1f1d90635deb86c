//! Test Pyramid CLI
//!
//! Collects JUnit XML reports into test pyramid metrics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use test_pyramid::commands::{
    display_schema, display_version, execute_clean, execute_collect, validate_args,
    validate_summary_file, CleanArgs, CollectArgs, Settings,
};
use test_pyramid::utils::config::FileConfig;

/// Test Pyramid - JUnit XML to test pyramid metrics
#[derive(Parser, Debug)]
#[command(name = "test-pyramid")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate JUnit reports and write summary.json + test-pyramid.prom
    Collect {
        /// Directory searched for reports
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Report glob, relative to --root (repeatable); default is per-suite discovery
        #[arg(long = "report", value_name = "GLOB")]
        reports: Vec<String>,

        /// Suite mapping SUITE=KIND (repeatable); replaces config/default mapping
        #[arg(long = "suite", value_name = "SUITE=KIND")]
        suites: Vec<String>,

        /// TOML config file
        #[arg(short, long, env = "TEST_PYRAMID_CONFIG")]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Warn and continue on unparseable reports instead of failing
        #[arg(long)]
        skip_malformed: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a summary.json file
    Validate {
        /// Path to summary JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Delete per-suite test result directories
    Clean {
        /// Directory searched for result directories
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Suite mapping SUITE=KIND (repeatable)
        #[arg(long = "suite", value_name = "SUITE=KIND")]
        suites: Vec<String>,

        /// TOML config file
        #[arg(short, long, env = "TEST_PYRAMID_CONFIG")]
        config: Option<PathBuf>,

        /// Only list directories
        #[arg(long)]
        dry_run: bool,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Collect {
            root,
            reports,
            suites,
            config,
            output,
            skip_malformed,
            summary,
        } => {
            let file_config = load_config(config)?;
            let settings = Settings::resolve(file_config.as_ref(), &suites, output, skip_malformed)
                .context("Invalid configuration")?;

            let args = CollectArgs {
                root,
                report_patterns: reports,
                settings,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_collect(args)?;
        }

        Commands::Validate { file } => {
            validate_summary_file(file)?;
        }

        Commands::Clean {
            root,
            suites,
            config,
            dry_run,
        } => {
            let file_config = load_config(config)?;
            let settings = Settings::resolve(file_config.as_ref(), &suites, None, false)
                .context("Invalid configuration")?;

            execute_clean(CleanArgs {
                root,
                suite_kinds: settings.suite_kinds,
                marker: settings.marker,
                dry_run,
            })?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Load the config file when one was given
///
/// **Private** - shared by collect and clean
fn load_config(path: Option<PathBuf>) -> Result<Option<FileConfig>> {
    path.map(|path| {
        FileConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))
    })
    .transpose()
}
