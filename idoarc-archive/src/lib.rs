//! # idoarc Archive
//!
//! Archive entity and container format for idoarc.
//!
//! This crate ties the codecs to a persistent archive:
//!
//! - [`codec`]: Encode payloads into entries with RLE or LZW and decode them back
//! - [`archive`]: The [`Archive`] entity with path-keyed upsert, sorted
//!   listing, and 1-based deletion
//! - [`password`]: Argon2id password digests and the [`PasswordHasher`] seam
//! - [`container`]: The on-disk `.ido` layout
//!
//! ## Example
//!
//! ```rust
//! use idoarc_archive::{Archive, EncodeParams, container, decode, encode};
//! use idoarc_core::{CodecKind, Payload};
//!
//! let entry = encode(CodecKind::Lzw, "TOBEORNOT", "notes.txt", EncodeParams::DEFAULT).unwrap();
//! let archive = Archive::unprotected(vec![entry]);
//!
//! let bytes = container::write(&archive).unwrap();
//! let restored = container::read(&bytes).unwrap();
//! assert_eq!(restored, archive);
//!
//! let entry = restored.get("notes.txt").unwrap();
//! assert_eq!(decode(entry).unwrap(), Payload::from("TOBEORNOT"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod codec;
pub mod container;
pub mod password;

// Re-exports
pub use archive::Archive;
pub use codec::{EncodeParams, decode, decode_as, encode};
pub use password::{Argon2Hasher, PasswordDigest, PasswordHasher, Protection};
