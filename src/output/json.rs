//! JSON summary output writer.
//!
//! Renders an AggregationResult as `summary.json` and reads it back.

use super::schema::SummaryDocument;
use super::validate_path;
use crate::aggregator::AggregationResult;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::path::Path;

/// Render the summary document, pretty-printed with a trailing newline
///
/// **Public** - pure function of the result
pub fn render_summary(result: &AggregationResult) -> Result<String, OutputError> {
    let document = SummaryDocument::from_result(result);
    let mut rendered = serde_json::to_string_pretty(&document)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write the summary document to a file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path is empty or a directory
pub fn write_summary(
    result: &AggregationResult,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    validate_path(output_path)?;

    let rendered = render_summary(result)?;
    std::fs::write(output_path, &rendered)?;

    info!(
        "Wrote test pyramid summary to {} ({} bytes)",
        output_path.display(),
        rendered.len()
    );
    Ok(())
}

/// Read a summary document from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<SummaryDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading summary from: {}", input_path.display());

    let file = File::open(input_path)?;
    let document: SummaryDocument = serde_json::from_reader(file)?;

    debug!(
        "Summary loaded: {} tests across {} kinds",
        document.totals.tests,
        document.suites.len()
    );

    Ok(document)
}
