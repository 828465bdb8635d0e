//! Data extraction and assembly for commitments-of-traders reports.
//!
//! This crate provides:
//! - Record models keyed by trader category
//! - Splitting of a report page into per-instrument blocks
//! - Field extraction from a free-text block
//! - Allow-list filtering and chronological series assembly
//! - CSV storage for extracted records

pub mod csv_storage;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod models;
pub mod report;
pub mod series;

pub use csv_storage::CsvStorage;
pub use error::DataError;
pub use extractor::RecordExtractor;
pub use filter::RecordFilter;
pub use models::{Category, CategoryValues, Record};
pub use report::{extract_preformatted, split_blocks};
pub use series::{coerce_numeric, parse_report_date, SeriesBuilder, SeriesRow, SeriesTable};
