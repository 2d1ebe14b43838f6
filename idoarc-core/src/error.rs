//! Error types for idoarc operations.
//!
//! One error type covers the codec preconditions, corrupted payloads and
//! containers, password failures, and I/O from the file helpers.

use std::io;
use thiserror::Error;

/// The main error type for idoarc operations.
#[derive(Debug, Error)]
pub enum IdoArcError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input or payload has the wrong type for the requested operation.
    #[error("Type mismatch: {message}")]
    TypeMismatch {
        /// Description of the mismatch.
        message: String,
    },

    /// Encoding was requested for an empty input.
    #[error("Empty input: nothing to encode")]
    EmptyInput,

    /// Unit size is not a positive integer.
    #[error("Invalid unit size: {0} (must be a positive integer)")]
    InvalidUnitSize(usize),

    /// Cap size is not a positive integer.
    #[error("Invalid cap size: {0} (must be a positive integer)")]
    InvalidCapSize(usize),

    /// The container failed its structural validity check.
    #[error("Corrupt container at offset {offset}: {message}")]
    CorruptContainer {
        /// Byte offset where the problem was detected.
        offset: usize,
        /// Description of the problem.
        message: String,
    },

    /// Password verification failed on a protected archive.
    #[error("Wrong password")]
    WrongPassword,

    /// An LZW code that is neither known nor the next code to be assigned.
    #[error("Bad compressed code: {code}")]
    BadCompressedCode {
        /// The offending code.
        code: u32,
    },

    /// Encoded payload is malformed.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Byte offset where corruption was detected.
        offset: usize,
        /// Description of the corruption.
        message: String,
    },

    /// Codec tag is not one of the known codecs.
    #[error("Unsupported codec: {name}")]
    UnsupportedCodec {
        /// The unrecognized tag.
        name: String,
    },

    /// Path traversal attack detected (e.g., "../" in the entry path).
    #[error("Path traversal detected in entry: {path}")]
    PathTraversal {
        /// The suspicious path.
        path: String,
    },

    /// The password hasher failed.
    #[error("Password hashing failed: {message}")]
    Password {
        /// Description of the hasher failure.
        message: String,
    },
}

/// Result type alias for idoarc operations.
pub type Result<T> = std::result::Result<T, IdoArcError>;

impl IdoArcError {
    /// Create a type mismatch error.
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch {
            message: message.into(),
        }
    }

    /// Create a corrupt container error.
    pub fn corrupt_container(offset: usize, message: impl Into<String>) -> Self {
        Self::CorruptContainer {
            offset,
            message: message.into(),
        }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: usize, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Create an unsupported codec error.
    pub fn unsupported_codec(name: impl Into<String>) -> Self {
        Self::UnsupportedCodec { name: name.into() }
    }

    /// Create a path traversal error.
    pub fn path_traversal(path: impl Into<String>) -> Self {
        Self::PathTraversal { path: path.into() }
    }

    /// Create a password hasher error.
    pub fn password(message: impl Into<String>) -> Self {
        Self::Password {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IdoArcError::corrupt_container(60, "truncated record");
        assert!(err.to_string().contains("Corrupt container"));
        assert!(err.to_string().contains("60"));

        let err = IdoArcError::InvalidUnitSize(0);
        assert!(err.to_string().contains("unit size"));

        let err = IdoArcError::unsupported_codec("HUF");
        assert!(err.to_string().contains("HUF"));

        let err = IdoArcError::BadCompressedCode { code: 999 };
        assert!(err.to_string().contains("999"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: IdoArcError = io_err.into();
        assert!(matches!(err, IdoArcError::Io(_)));
    }
}
