//! Error types for value parsing in ehs-types.

use thiserror::Error;

/// Errors that can occur when parsing safety values from text.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The text is not one of `SAFE`, `CAUTION` or `DANGER`.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// A health condition name was empty.
    #[error("Invalid condition: condition name must not be empty")]
    EmptyCondition,
}

/// Result type alias using ehs-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
