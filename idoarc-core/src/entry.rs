//! Archive entry metadata.
//!
//! This module defines the `Entry` struct that represents one encoded file
//! within an archive, the `CodecKind` tag naming the codec that produced it,
//! and the `Payload` type that carries decoded content.

use crate::error::{IdoArcError, Result};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Codec used to encode an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodecKind {
    /// Run-length encoding over fixed-width symbol windows.
    #[default]
    Rle,
    /// Lempel-Ziv-Welch dictionary coding.
    Lzw,
}

impl CodecKind {
    /// All known codecs.
    pub const ALL: [CodecKind; 2] = [CodecKind::Rle, CodecKind::Lzw];

    /// Get the codec tag as stored in the container.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rle => "RLE",
            Self::Lzw => "LZW",
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodecKind {
    type Err = IdoArcError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "RLE" => Ok(Self::Rle),
            "LZW" => Ok(Self::Lzw),
            other => Err(IdoArcError::unsupported_codec(other)),
        }
    }
}

/// Content handed to a codec, or returned by one.
///
/// The variant decides which codec path runs: `Binary` content is treated as
/// raw bytes, `Text` content as a sequence of characters. Decoding restores
/// the variant that was encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Binary(Vec<u8>),
}

impl Payload {
    /// Check if this is binary content.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(_))
    }

    /// Length of the content in bytes.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Binary(bytes) => bytes.len(),
        }
    }

    /// Check if there is no content.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the content as bytes (UTF-8 for text).
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    /// Consume the payload and return its bytes (UTF-8 for text).
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Self::Binary(bytes.to_vec())
    }
}

/// One archived file: its encoded payload plus the metadata needed to
/// decode it and place it back on disk.
///
/// The path uses `/` as separator regardless of platform and is the identity
/// key of the entry inside an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    data: Vec<u8>,
    binary: bool,
    unit_size: usize,
    path: String,
    codec: CodecKind,
    cap_size: usize,
}

impl Entry {
    /// Create a new entry.
    ///
    /// Fails if `data` is empty or `cap_size` is zero.
    pub fn new(
        data: Vec<u8>,
        binary: bool,
        unit_size: usize,
        path: impl Into<String>,
        codec: CodecKind,
        cap_size: usize,
    ) -> Result<Self> {
        if data.is_empty() {
            return Err(IdoArcError::corrupted(0, "entry data is empty"));
        }
        if cap_size == 0 {
            return Err(IdoArcError::InvalidCapSize(cap_size));
        }
        Ok(Self {
            data,
            binary,
            unit_size,
            path: path.into(),
            codec,
            cap_size,
        })
    }

    /// Encoded payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the original input was raw bytes.
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Width of the symbol window the codec operated on.
    pub fn unit_size(&self) -> usize {
        self.unit_size
    }

    /// Relative path of the entry.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Codec that produced the payload.
    pub fn codec(&self) -> CodecKind {
        self.codec
    }

    /// Maximum run count of one RLE record.
    pub fn cap_size(&self) -> usize {
        self.cap_size
    }

    /// Encoded size in bytes.
    pub fn encoded_size(&self) -> usize {
        self.data.len()
    }

    /// Encoded size relative to the original size.
    ///
    /// Values below 1.0 mean the codec shrank the input. Returns 0.0 for an
    /// empty original.
    pub fn compression_ratio(&self, original_size: usize) -> f64 {
        if original_size == 0 {
            return 0.0;
        }
        self.data.len() as f64 / original_size as f64
    }

    /// Replace the entry path.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Builder method to prefix the path with a parent folder name.
    pub fn with_parent(mut self, parent: &str) -> Self {
        self.path = format!("{}/{}", parent.trim_end_matches('/'), self.path);
        self
    }

    /// Path with separators normalized to `/`.
    pub fn normalized_path(&self) -> String {
        normalize_path(&self.path)
    }

    /// Convert the stored path to a platform path.
    pub fn native_path(&self) -> PathBuf {
        self.normalized_path().split('/').filter(|c| !c.is_empty()).collect()
    }

    /// Validate the entry path for security.
    ///
    /// Returns an error if the path contains potentially dangerous components
    /// like ".." (parent directory traversal) or absolute paths.
    pub fn validate_path(&self) -> Result<()> {
        let normalized = self.normalized_path();
        if normalized.starts_with('/') || normalized.is_empty() {
            return Err(IdoArcError::path_traversal(&self.path));
        }

        let path = Path::new(&normalized);
        if path.is_absolute() {
            return Err(IdoArcError::path_traversal(&self.path));
        }

        for component in path.components() {
            match component {
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(IdoArcError::path_traversal(&self.path));
                }
                _ => {}
            }
        }

        // Windows drive letters survive normalization on unix hosts
        if normalized.len() >= 2 && normalized.as_bytes()[1] == b':' {
            return Err(IdoArcError::path_traversal(&self.path));
        }

        Ok(())
    }
}

/// Normalize path separators to `/`.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
