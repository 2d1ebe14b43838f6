//! # idoarc-LZW: Pure Rust LZW Compression
//!
//! This crate provides LZW (Lempel-Ziv-Welch) compression and decompression
//! for idoarc entries.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Unbounded dictionary**: Codes grow from 256 without clear codes
//! - **Decimal code stream**: Codes are written as ASCII decimal numbers,
//!   each terminated by a separator byte (`~` by default)
//!
//! ## Stream Format
//!
//! The dictionary starts with the 256 single-byte strings (codes 0-255).
//! New strings are assigned codes 256, 257, ... in the order the encoder
//! first meets them. The stream carries no header and no end code:
//!
//! ```text
//! "123123123"  ->  49~50~51~256~258~257~259~
//! ```
//!
//! ## Example
//!
//! ```rust
//! use idoarc_lzw::{compress_standard, decompress_standard};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! // Compress
//! let compressed = compress_standard(original).unwrap();
//!
//! // Decompress
//! let decompressed = decompress_standard(&compressed).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod codes;
mod config;
mod decoder;
mod dictionary;
mod encoder;
mod error;

pub use config::LzwConfig;
pub use decoder::LzwDecoder;
pub use encoder::LzwEncoder;
pub use error::{LzwError, Result};

/// Decompress an LZW code stream with the given configuration.
///
/// # Example
///
/// ```rust
/// use idoarc_lzw::{decompress, compress, LzwConfig};
///
/// let original = b"Hello, World!";
/// let compressed = compress(original, LzwConfig::STANDARD).unwrap();
/// let decompressed = decompress(&compressed, LzwConfig::STANDARD).unwrap();
/// assert_eq!(decompressed, original);
/// ```
pub fn decompress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let mut decoder = LzwDecoder::new(config)?;
    decoder.decode(data)
}

/// Compress data with LZW using the given configuration.
///
/// # Example
///
/// ```rust
/// use idoarc_lzw::{compress, LzwConfig};
///
/// let compressed = compress(b"ABABABAB", LzwConfig::new(b',')).unwrap();
/// assert_eq!(compressed, b"65,66,256,258,66,");
/// ```
pub fn compress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let mut encoder = LzwEncoder::new(config)?;
    Ok(encoder.encode(data))
}

/// Decompress with the standard `~` separator (convenience function).
pub fn decompress_standard(data: &[u8]) -> Result<Vec<u8>> {
    decompress(data, LzwConfig::STANDARD)
}

/// Compress with the standard `~` separator (convenience function).
pub fn compress_standard(data: &[u8]) -> Result<Vec<u8>> {
    compress(data, LzwConfig::STANDARD)
}
