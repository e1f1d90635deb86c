//! Clean command implementation.
//!
//! Deletes the per-suite result directories (`**/build/test-results/<suite>`)
//! so the next collect only sees reports from a fresh test run.

use super::models::CleanArgs;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

/// Execute the clean command
///
/// Returns the directories that were deleted (or would be, on a dry run).
pub fn execute_clean(args: CleanArgs) -> Result<Vec<PathBuf>> {
    let dirs = find_suite_result_dirs(&args)?;

    if dirs.is_empty() {
        info!("No suite result directories found under {}", args.root.display());
        return Ok(dirs);
    }

    for dir in &dirs {
        if args.dry_run {
            println!("would delete {}", dir.display());
            continue;
        }

        std::fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to delete {}", dir.display()))?;
        info!("Deleted {}", dir.display());
    }

    Ok(dirs)
}

/// Result directories of every configured suite under the root
pub fn find_suite_result_dirs(args: &CleanArgs) -> Result<Vec<PathBuf>> {
    let root = args.root.to_string_lossy();
    let root = glob::Pattern::escape(root.trim_end_matches('/'));
    let marker = glob::Pattern::escape(args.marker.trim_end_matches('/'));

    let mut dirs = Vec::new();
    for suite in args.suite_kinds.suite_ids() {
        let pattern = format!("{}/**{}/{}", root, marker, glob::Pattern::escape(suite));
        debug!("Searching: {}", pattern);

        let entries =
            glob::glob(&pattern).with_context(|| format!("Invalid pattern: {}", pattern))?;
        dirs.extend(entries.filter_map(|entry| entry.ok()).filter(|path| path.is_dir()));
    }

    dirs.sort();
    dirs.dedup();
    Ok(dirs)
}
