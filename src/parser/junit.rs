//! JUnit XML report parser.
//!
//! Reads either a single `<testsuite>` root or a `<testsuites>` root whose
//! `<testsuite>` elements each contribute separately. Documents carrying a
//! DOCTYPE are refused and entity references beyond the predefined XML ones
//! are never resolved, so report content cannot pull in external resources.

use super::schema::SuiteReport;
use crate::utils::error::ParseError;
use log::debug;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

const SUITE_TAG: &[u8] = b"testsuite";
const COLLECTION_TAG: &[u8] = b"testsuites";

/// What the document root turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootKind {
    Suite,
    Collection,
    Other,
}

/// Parse a report file from disk
///
/// **Public** - main entry point for file parsing
///
/// # Errors
/// * `ParseError::Io` - file cannot be read
/// * `ParseError::Malformed` - document is not well-formed
/// * `ParseError::DoctypeForbidden` - document declares a DOCTYPE
pub fn parse_report_file(path: impl AsRef<Path>) -> Result<Vec<SuiteReport>, ParseError> {
    let path = path.as_ref();
    let content = std::fs::read(path)?;
    let suites = parse_report_bytes(&content)?;

    debug!("{}: {} suite element(s)", path.display(), suites.len());
    for suite in &suites {
        debug!(
            "  {}: {} test(s), {} failure(s), {} skipped, {:.3}s",
            suite.name.as_deref().unwrap_or("<unnamed>"),
            suite.tests,
            suite.failures,
            suite.skipped,
            suite.duration_seconds
        );
    }
    Ok(suites)
}

/// Parse report content into zero or more suite contributions
///
/// Unknown root elements yield no contributions. Numeric attributes that
/// are missing or unparseable count as zero.
pub fn parse_report(xml: &str) -> Result<Vec<SuiteReport>, ParseError> {
    read_suites(Reader::from_str(xml))
}

/// Parse raw report bytes, decoding them per the BOM or XML declaration
pub fn parse_report_bytes(xml: &[u8]) -> Result<Vec<SuiteReport>, ParseError> {
    read_suites(Reader::from_reader(xml))
}

fn read_suites(mut reader: Reader<&[u8]>) -> Result<Vec<SuiteReport>, ParseError> {
    reader.config_mut().trim_text(true);

    let mut suites = Vec::new();
    let mut root: Option<RootKind> = None;
    let mut root_closed = false;
    let mut depth: usize = 0;

    loop {
        match reader.read_event()? {
            Event::DocType(_) => return Err(ParseError::DoctypeForbidden),
            Event::Start(element) => {
                let decoder = reader.decoder();
                visit_element(&element, decoder, depth, &mut root, root_closed, &mut suites)?;
                depth += 1;
            }
            Event::Empty(element) => {
                let decoder = reader.decoder();
                visit_element(&element, decoder, depth, &mut root, root_closed, &mut suites)?;
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::End(_) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    ParseError::Malformed("closing tag without matching start".to_string())
                })?;
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Text(text) if depth == 0 && !is_blank(&text) => {
                return Err(ParseError::Malformed(
                    "text content outside the root element".to_string(),
                ));
            }
            Event::CData(_) if depth == 0 => {
                return Err(ParseError::Malformed(
                    "CDATA section outside the root element".to_string(),
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ParseError::Malformed(format!(
            "document ended with {} unclosed element(s)",
            depth
        )));
    }
    if root.is_none() {
        return Err(ParseError::Malformed("document has no root element".to_string()));
    }

    Ok(suites)
}

/// Record the root kind and collect suite elements
///
/// **Private** - internal helper for parse_report
fn visit_element(
    element: &BytesStart<'_>,
    decoder: Decoder,
    depth: usize,
    root: &mut Option<RootKind>,
    root_closed: bool,
    suites: &mut Vec<SuiteReport>,
) -> Result<(), ParseError> {
    let name = element.name();

    if depth == 0 {
        if root_closed {
            return Err(ParseError::Malformed(
                "document has more than one root element".to_string(),
            ));
        }

        let kind = match name.as_ref() {
            SUITE_TAG => RootKind::Suite,
            COLLECTION_TAG => RootKind::Collection,
            _ => RootKind::Other,
        };
        *root = Some(kind);

        if kind == RootKind::Suite {
            suites.push(read_suite(element, decoder)?);
        }
        return Ok(());
    }

    // Inside a collection every testsuite counts, however deeply nested
    if *root == Some(RootKind::Collection) && name.as_ref() == SUITE_TAG {
        suites.push(read_suite(element, decoder)?);
    }

    Ok(())
}

/// Extract metrics from a `<testsuite>` element's attributes
///
/// **Private** - internal helper for visit_element
fn read_suite(element: &BytesStart<'_>, decoder: Decoder) -> Result<SuiteReport, ParseError> {
    let mut report = SuiteReport::default();
    let mut failures: u64 = 0;
    let mut errors: u64 = 0;

    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| ParseError::Malformed(e.to_string()))?;
        let value = attribute_value(&attribute.value, decoder)?;

        match attribute.key.as_ref() {
            b"name" => report.name = Some(value),
            b"tests" => report.tests = parse_count(&value),
            b"failures" => failures = parse_count(&value),
            b"errors" => errors = parse_count(&value),
            b"skipped" => report.skipped = parse_count(&value),
            b"time" => report.duration_seconds = parse_seconds(&value),
            _ => {}
        }
    }

    report.failures = failures.saturating_add(errors);
    Ok(report)
}

/// Decode an attribute in the document's charset and resolve predefined entities
fn attribute_value(raw: &[u8], decoder: Decoder) -> Result<String, ParseError> {
    let decoded = decoder
        .decode(raw)
        .map_err(|e| ParseError::Malformed(e.to_string()))?;
    let unescaped = quick_xml::escape::unescape(&decoded)
        .map_err(|e| ParseError::Malformed(e.to_string()))?;
    Ok(unescaped.into_owned())
}

fn is_blank(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

/// Non-negative integer attribute, zero when absent or invalid
pub(crate) fn parse_count(value: &str) -> u64 {
    value.trim().parse().unwrap_or(0)
}

/// Seconds attribute, zero when absent, invalid, negative, or not finite
pub(crate) fn parse_seconds(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
        .unwrap_or(0.0)
}
