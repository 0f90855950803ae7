//! Errors that surface to callers of the analysis pipeline.
//!
//! Band-pass failures are not represented here: they are recovered inside the
//! extractor by switching to the moving-average path (see `filters::FilterError`).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum KwaveError {
    /// Non-positive or non-finite price, too few points, unordered dates,
    /// or an out-of-range parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No finite slope/curvature at the requested point.
    #[error("insufficient history: {0}")]
    InsufficientHistory(String),
}

pub type Result<T> = std::result::Result<T, KwaveError>;
