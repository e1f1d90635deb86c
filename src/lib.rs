//! Test Pyramid
//!
//! Aggregates JUnit XML test reports into test pyramid metrics:
//! per-kind (unit, integration, contract, e2e) test counts, failures,
//! skips and durations, written as a JSON summary and a Prometheus
//! text exposition document.
//!
//! This crate provides the core implementation for the
//! `test-pyramid` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install test-pyramid
//! test-pyramid collect --root . --summary
//! ```
//!
//! Library use:
//!
//! ```ignore
//! use test_pyramid::aggregator::{aggregate_reports, CollectOptions};
//! use test_pyramid::output::write_reports;
//! use test_pyramid::utils::config::SuiteKinds;
//!
//! let collection = aggregate_reports(&files, &SuiteKinds::default(), &CollectOptions::default())?;
//! write_reports(&collection.result, "build/reports/test-pyramid")?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
