//! Error types for the mediatype crate.

use thiserror::Error;

/// The main error type for the mediatype crate.
///
/// Only normalization of a raw string can fail. Splitting an already
/// normalized type into its parts is total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The type portion is missing or malformed
    #[error("Media type error: {0}")]
    MediaType(String),

    /// A parameter could not be parsed
    #[error("Invalid media parameter")]
    InvalidMediaParameter,

    /// A parameter name was given twice with different values
    #[error("Duplicate parameter name: {0}")]
    DuplicateParameter(String),
}

/// Specialized Result type for mediatype operations.
pub type Result<T> = std::result::Result<T, Error>;
