//! Error types for imatlas-common.

use thiserror::Error;

/// Common error type for binary reading and writing.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// String does not fit behind a 16-bit length prefix.
    #[error("string of {len} bytes exceeds the 65535 byte length prefix")]
    StringTooLong { len: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
