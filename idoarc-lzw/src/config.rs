//! LZW code stream configuration.

use crate::error::{LzwError, Result};

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Byte written after every decimal code in the stream.
    pub separator: u8,
}

impl LzwConfig {
    /// Standard configuration: codes terminated by `~`.
    pub const STANDARD: Self = Self { separator: b'~' };

    /// Create a new LZW configuration.
    pub fn new(separator: u8) -> Self {
        Self { separator }
    }

    /// Number of single-byte codes the dictionary starts with.
    pub fn initial_codes(&self) -> u32 {
        256
    }

    /// Check that the separator cannot occur inside a code.
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_ascii_digit() {
            return Err(LzwError::InvalidSeparator(self.separator));
        }
        Ok(())
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}
