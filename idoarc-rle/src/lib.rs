//! # idoarc-RLE: Fixed-Window Run-Length Encoding
//!
//! Run-length encoding over fixed-width symbol windows, with decimal run
//! counts.
//!
//! ## Record Format
//!
//! The input is scanned in windows of `unit_size` symbols (bytes for binary
//! input, chars for text). Each record is a zero-padded decimal run count,
//! as wide as the number of digits in `cap_size`, followed by the window:
//!
//! ```text
//! unit_size = 3, cap_size = 99
//! "111222333"  ->  "01" "111" "01" "222" "01" "333"
//! ```
//!
//! Runs longer than `cap_size` are split into saturated records. The final
//! window may be shorter than `unit_size`.
//!
//! ## Example
//!
//! ```rust
//! use idoarc_rle::{RleConfig, decode_text, encode_text};
//!
//! let config = RleConfig::new(5, 99);
//! let encoded = encode_text("aaa111", &config).unwrap();
//! assert_eq!(encoded, "01aaa11011");
//! assert_eq!(decode_text(&encoded, &config).unwrap(), "aaa111");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decode;
mod encode;

pub use config::RleConfig;
pub use decode::{decode_bytes, decode_text};
pub use encode::{encode_bytes, encode_text};
