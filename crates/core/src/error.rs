//! Error types for configuration handling.

use thiserror::Error;

/// Errors raised when a loaded configuration cannot drive the pipeline.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Rolling-mean window must cover at least one row.
    #[error("ma_window must be at least 1, got {0}")]
    MaWindow(usize),

    /// Z-score window needs two observations for a standard deviation.
    #[error("z_lookback must be at least 2, got {0}")]
    ZLookback(usize),

    /// Signal threshold must be a finite, non-negative number.
    #[error("z_thresh must be finite and non-negative, got {0}")]
    ZThreshold(f64),

    /// Unrecognised partition mode.
    #[error("invalid partition '{0}'. Valid values: table, instrument")]
    Partition(String),
}
