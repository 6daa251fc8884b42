//! Error types for hanzi-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised when constructing validated core values.
///
/// The sampler and the pinyin transducer never fail; only input
/// validation at the edges produces these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid HSK level {0}, expected 1-6")]
    InvalidHskLevel(i64),

    #[error("invalid pack size {0}, expected at least 1")]
    InvalidPackSize(usize),

    #[error("unknown matching mode: {0}")]
    UnknownMatchingMode(String),
}
