//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod clean;
pub mod collect;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use clean::{execute_clean, find_suite_result_dirs};
pub use collect::{discover_reports, execute_collect, validate_args, CollectOutcome};
pub use models::{CleanArgs, CollectArgs, Settings};
pub use utils::{
    check_summary, display_schema, display_version, format_summary_table, validate_summary_file,
};
