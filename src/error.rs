//! Error types for canvas operations and the document service

use thiserror::Error;

/// Result type alias for canvas and service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while drawing, encoding or storing canvases
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A supplied coordinate lies outside the grid
    #[error("point out of bound")]
    PointOutOfBound,

    /// A rectangle extends past the grid even though its origin is valid
    #[error("object too large")]
    ObjectTooLarge,

    /// A fill or outline pattern has the wrong length or is not printable
    #[error("the drawing pattern is invalid")]
    BadPattern,

    /// The canvas could not be converted to its record form
    #[error("failed to encode canvas: {0}")]
    EncodingFailure(String),

    /// A stored or submitted record could not be turned back into a canvas
    #[error("failed to decode canvas: {0}")]
    DecodingFailure(String),

    /// No document exists under the given key
    #[error("document not found: {0}")]
    NotFound(String),

    /// A request was well-formed but not acceptable
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The document store failed
    #[error("store error: {0}")]
    StoreError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StoreError(err.to_string())
    }
}
