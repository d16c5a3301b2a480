//! Error types for atlas decoding, encoding and lookups.

use thiserror::Error;

/// Errors that can occur when working with image atlases.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The buffer ended in the middle of a record.
    #[error("atlas data truncated: needed {needed} bytes but only {available} available")]
    Truncated { needed: usize, available: usize },

    /// The input is an XML atlas, which cannot be imported.
    #[error("unsupported atlas format: XML import is not implemented")]
    UnsupportedFormat,

    /// Index lookup past the end of a sequence.
    #[error("{kind} index {index} out of range (length {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    /// Name lookup matched nothing.
    #[error("{kind} named {name:?} not found")]
    NotFound { kind: &'static str, name: String },

    /// A count does not fit in the 16-bit field that carries it on disk.
    #[error("too many {kind}s to encode: {count} exceeds 65535")]
    CountOverflow { kind: &'static str, count: usize },

    /// A string does not fit behind its 16-bit length prefix.
    #[error("string of {len} bytes exceeds the 65535 byte length prefix")]
    StringTooLong { len: usize },

    /// XML writing error.
    #[error("XML error: {0}")]
    Xml(String),
}

impl Error {
    /// Build a [`Error::NotFound`] for a raw name, shown lossily.
    pub(crate) fn not_found(kind: &'static str, name: &[u8]) -> Self {
        Error::NotFound {
            kind,
            name: String::from_utf8_lossy(name).into_owned(),
        }
    }
}

impl From<imatlas_common::Error> for Error {
    fn from(e: imatlas_common::Error) -> Self {
        match e {
            imatlas_common::Error::UnexpectedEof { needed, available } => {
                Error::Truncated { needed, available }
            }
            imatlas_common::Error::StringTooLong { len } => Error::StringTooLong { len },
            imatlas_common::Error::Io(e) => Error::Io(e),
        }
    }
}

/// Result type for atlas operations.
pub type Result<T> = std::result::Result<T, Error>;
