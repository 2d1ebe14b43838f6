//! LZW-specific error types.

use thiserror::Error;

/// LZW compression/decompression errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// Code that is neither in the dictionary nor the next code to be assigned.
    #[error("Invalid LZW code: {0}")]
    InvalidCode(u32),

    /// A token in the code stream is not a decimal code.
    #[error("Malformed code at byte offset {offset}: {token:?}")]
    MalformedCode {
        /// Byte offset of the token.
        offset: usize,
        /// The offending token, lossily decoded.
        token: String,
    },

    /// The code stream holds no codes at all.
    #[error("Empty code stream")]
    EmptyStream,

    /// Separator would be ambiguous inside decimal codes.
    #[error("Invalid separator: {0:#04x} (must not be an ASCII digit)")]
    InvalidSeparator(u8),
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;
