//! Commitments-of-traders pipeline wiring: report retrieval, collection,
//! feature computation and reporting.

pub mod commands;
pub mod pipeline;
pub mod report;
pub mod source;

pub use pipeline::{build_features, collect_records, CollectOutcome, SourceFailure};
pub use report::Reporter;
pub use source::HttpReportSource;
