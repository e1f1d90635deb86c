//! Collect command implementation.
//!
//! The collect command:
//! 1. Resolves candidate report files (explicit globs or per-suite discovery)
//! 2. Aggregates them into per-kind metrics
//! 3. Writes `summary.json` and `test-pyramid.prom`

use super::models::CollectArgs;
use super::utils::format_summary_table;
use crate::aggregator::{aggregate_reports, Collection, CollectOptions};
use crate::output::{write_reports, ReportPaths};
use crate::utils::config::{SuiteKinds, REPORT_EXTENSION, REPORT_PREFIX};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What a successful collect produced
#[derive(Debug, Clone)]
pub struct CollectOutcome {
    pub paths: ReportPaths,
    pub collection: Collection,
}

/// Execute the collect command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * No tests found in any report (nothing is written)
/// * A malformed report when the policy is fail-fast
/// * File write errors
pub fn execute_collect(args: CollectArgs) -> Result<CollectOutcome> {
    let start_time = Instant::now();

    info!("Collecting test pyramid metrics under: {}", args.root.display());

    info!("Step 1/3: Resolving report files...");
    let files = discover_reports(&args)?;
    debug!("Resolved {} candidate file(s)", files.len());

    info!("Step 2/3: Aggregating reports...");
    let options = CollectOptions {
        marker: args.settings.marker.clone(),
        on_malformed: args.settings.on_malformed,
    };
    let collection = aggregate_reports(&files, &args.settings.suite_kinds, &options)?;

    info!("Step 3/3: Writing output files...");
    let paths = write_reports(&collection.result, &args.settings.output_dir)
        .context("Failed to write test pyramid reports")?;

    info!("✓ Metrics written to: {}", paths.metrics.display());
    info!("✓ Summary written to: {}", paths.summary.display());

    if args.print_summary {
        println!("\n{}", format_summary_table(&collection.result));
    }

    info!("Collect completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(CollectOutcome { paths, collection })
}

/// Resolve the candidate file set
///
/// Explicit patterns are taken relative to the root unless absolute;
/// otherwise every configured suite gets its default pattern.
pub fn discover_reports(args: &CollectArgs) -> Result<Vec<PathBuf>> {
    let patterns = if args.report_patterns.is_empty() {
        default_patterns(&args.root, &args.settings.suite_kinds, &args.settings.marker)
    } else {
        args.report_patterns
            .iter()
            .map(|pattern| rooted_pattern(&args.root, pattern))
            .collect()
    };

    let mut files = Vec::new();
    for pattern in &patterns {
        debug!("Searching: {}", pattern);

        let entries =
            glob::glob(pattern).with_context(|| format!("Invalid report pattern: {}", pattern))?;

        for entry in entries {
            match entry {
                Ok(path) => files.push(path),
                Err(e) => warn!("Cannot read {}: {}", e.path().display(), e.error()),
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// `<root>/**<marker><suite>/TEST-*.xml` for every configured suite
pub fn default_patterns(root: &Path, kinds: &SuiteKinds, marker: &str) -> Vec<String> {
    let root = escaped_root(root);
    let marker = glob::Pattern::escape(marker);

    kinds
        .suite_ids()
        .map(|suite| {
            format!(
                "{}/**{}{}/{}*.{}",
                root,
                marker,
                glob::Pattern::escape(suite),
                REPORT_PREFIX,
                REPORT_EXTENSION
            )
        })
        .collect()
}

fn rooted_pattern(root: &Path, pattern: &str) -> String {
    if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        format!("{}/{}", escaped_root(root), pattern)
    }
}

fn escaped_root(root: &Path) -> String {
    let root = root.to_string_lossy();
    glob::Pattern::escape(root.trim_end_matches('/'))
}

/// Validate collect arguments
///
/// **Public** - can be called before execute_collect for early validation
pub fn validate_args(args: &CollectArgs) -> Result<()> {
    if args.settings.marker.is_empty() {
        anyhow::bail!("Results marker cannot be empty");
    }

    if !args.settings.marker.starts_with('/') || !args.settings.marker.ends_with('/') {
        anyhow::bail!(
            "Results marker must start and end with '/' (got '{}')",
            args.settings.marker
        );
    }

    if args.settings.output_dir.as_os_str().is_empty() {
        anyhow::bail!("Output directory cannot be empty");
    }

    if args.report_patterns.is_empty() && !args.root.is_dir() {
        anyhow::bail!("Root directory does not exist: {}", args.root.display());
    }

    for pattern in &args.report_patterns {
        glob::Pattern::new(pattern)
            .with_context(|| format!("Invalid report pattern: {}", pattern))?;
    }

    Ok(())
}
