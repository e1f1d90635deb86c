//! Aggregation of suite contributions into test pyramid metrics.
//!
//! This module transforms parsed reports into:
//! - Per-kind test counts, failures, skips and durations
//! - Totals and percentage shares
//! - Run statistics for logging

pub mod accumulator;
pub mod collector;
pub mod metrics;

// Re-export main types and functions
pub use accumulator::Aggregator;
pub use collector::{
    aggregate_reports, aggregate_reports_at, Collection, CollectOptions, MalformedPolicy, RunStats,
};
pub use metrics::{percentage, AggregationResult, KindAggregate};
