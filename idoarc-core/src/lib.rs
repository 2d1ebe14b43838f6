//! # idoarc Core
//!
//! Core components for the idoarc archiver.
//!
//! This crate provides the building blocks shared by the codec and container
//! crates:
//!
//! - [`entry`]: Archive entry metadata, codec tags, and payloads
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! idoarc is designed as a layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Front end                                           │
//! │     idoarc CLI (add, extract, list, delete, test)       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Container                                           │
//! │     Archive, password slot, record framing              │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Codec                                               │
//! │     RLE, LZW                                            │
//! ├─────────────────────────────────────────────────────────┤
//! │ L0: Core (this crate)                                   │
//! │     Entry, Payload, errors                              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use idoarc_core::{CodecKind, Entry};
//!
//! let entry = Entry::new(b"03a".to_vec(), false, 1, "notes.txt", CodecKind::Rle, 99).unwrap();
//! assert_eq!(entry.codec().name(), "RLE");
//! assert!(entry.validate_path().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod entry;
pub mod error;

// Re-exports for convenience
pub use entry::{CodecKind, Entry, Payload, normalize_path};
pub use error::{IdoArcError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::entry::{CodecKind, Entry, Payload};
    pub use crate::error::{IdoArcError, Result};
}
