//! RLE decoder.

use crate::config::RleConfig;
use idoarc_core::{IdoArcError, Result};

/// Parse a run-length field made of ASCII digits.
fn parse_count(field: impl IntoIterator<Item = u32>, offset: usize) -> Result<usize> {
    let mut count = 0usize;
    for digit in field {
        let value = char::from_u32(digit)
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| IdoArcError::corrupted(offset, "run-length field is not decimal"))?;
        count = count
            .checked_mul(10)
            .and_then(|c| c.checked_add(value as usize))
            .ok_or_else(|| IdoArcError::corrupted(offset, "run-length field overflows"))?;
    }
    Ok(count)
}

/// Walk the records of an encoded symbol sequence.
///
/// Each record is `count_width` digit symbols followed by up to `unit_size`
/// window symbols; only the final record may carry a short window.
fn expand_runs<T: Copy + Into<u32>>(encoded: &[T], config: &RleConfig) -> Result<Vec<T>> {
    config.validate()?;
    let width = config.count_width();
    let unit = config.unit_size;

    let mut output = Vec::with_capacity(encoded.len());
    let mut i = 0;

    while i < encoded.len() {
        let field = encoded
            .get(i..i + width)
            .ok_or_else(|| IdoArcError::corrupted(i, "truncated run-length field"))?;
        let count = parse_count(field.iter().map(|&s| s.into()), i)?;
        if count > config.cap_size {
            return Err(IdoArcError::corrupted(i, "run-length count exceeds cap size"));
        }

        let start = i + width;
        let next = start
            .checked_add(unit)
            .ok_or_else(|| IdoArcError::corrupted(start, "window overflows"))?;
        let end = next.min(encoded.len());
        if start >= end {
            return Err(IdoArcError::corrupted(start, "run without symbols"));
        }

        let window = &encoded[start..end];
        let expanded = count
            .checked_mul(window.len())
            .ok_or_else(|| IdoArcError::corrupted(i, "run expands past addressable size"))?;
        output
            .try_reserve(expanded)
            .map_err(|_| IdoArcError::corrupted(i, "run expands past available memory"))?;
        for _ in 0..count {
            output.extend_from_slice(window);
        }

        i = next;
    }

    Ok(output)
}

/// Decode bytes produced by [`encode_bytes`](crate::encode_bytes).
pub fn decode_bytes(data: &[u8], config: &RleConfig) -> Result<Vec<u8>> {
    let output = expand_runs(data, config)?;
    log::trace!("rle: decoded {} bytes into {} bytes", data.len(), output.len());
    Ok(output)
}

/// Decode text produced by [`encode_text`](crate::encode_text).
pub fn decode_text(data: &str, config: &RleConfig) -> Result<String> {
    let chars: Vec<char> = data.chars().collect();
    let output: String = expand_runs(&chars, config)?.into_iter().collect();
    log::trace!("rle: decoded {} chars into {} chars", chars.len(), output.chars().count());
    Ok(output)
}
