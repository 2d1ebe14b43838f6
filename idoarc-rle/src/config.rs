//! RLE configuration.

use idoarc_core::{IdoArcError, Result};

/// RLE configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RleConfig {
    /// Width of the symbol window, in bytes (binary) or chars (text).
    pub unit_size: usize,
    /// Maximum run count of a single record; longer runs are split.
    pub cap_size: usize,
}

impl RleConfig {
    /// Default configuration: 5-symbol windows, runs capped at 99.
    pub const DEFAULT: Self = Self {
        unit_size: 5,
        cap_size: 99,
    };

    /// Create a new RLE configuration.
    pub fn new(unit_size: usize, cap_size: usize) -> Self {
        Self {
            unit_size,
            cap_size,
        }
    }

    /// Check that both sizes are positive.
    pub fn validate(&self) -> Result<()> {
        if self.unit_size == 0 {
            return Err(IdoArcError::InvalidUnitSize(self.unit_size));
        }
        if self.cap_size == 0 {
            return Err(IdoArcError::InvalidCapSize(self.cap_size));
        }
        Ok(())
    }

    /// Width of the zero-padded run-length field: the number of decimal
    /// digits in `cap_size`.
    pub fn count_width(&self) -> usize {
        let mut width = 1;
        let mut rest = self.cap_size / 10;
        while rest > 0 {
            width += 1;
            rest /= 10;
        }
        width
    }
}

impl Default for RleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
