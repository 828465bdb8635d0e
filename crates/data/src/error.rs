//! Error types for report and storage handling.

use thiserror::Error;

/// Errors from the I/O edges of the data crate.
///
/// Extraction itself never fails: malformed blocks and fields degrade to
/// missing values instead.
#[derive(Debug, Error)]
pub enum DataError {
    /// Filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from a CSV header.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// The report page has no preformatted text section.
    #[error("no <pre> section found in report page")]
    NoPreformattedText,
}
