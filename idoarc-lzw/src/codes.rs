//! Decimal code stream.
//!
//! Codes are written as ASCII decimal numbers, each one followed by the
//! configured separator byte: `84~79~66~`.

use crate::error::{LzwError, Result};

/// Reader that yields codes from a separator-terminated decimal stream.
#[derive(Debug)]
pub struct CodeReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Current byte position.
    pos: usize,
    /// Separator byte.
    separator: u8,
    /// Number of codes read so far.
    codes_read: usize,
}

impl<'a> CodeReader<'a> {
    /// Create a new code reader.
    pub fn new(data: &'a [u8], separator: u8) -> Self {
        Self {
            data,
            pos: 0,
            separator,
            codes_read: 0,
        }
    }

    /// Read the next code, or `None` at the end of the stream.
    ///
    /// Every code must be non-empty, all digits, fit in a `u32`, and be
    /// terminated by the separator.
    pub fn read_code(&mut self) -> Result<Option<u32>> {
        if self.pos >= self.data.len() {
            return Ok(None);
        }

        let start = self.pos;
        let rest = &self.data[start..];
        let Some(len) = rest.iter().position(|&b| b == self.separator) else {
            return Err(self.malformed(start, rest));
        };

        let token = &rest[..len];
        if token.is_empty() || !token.iter().all(u8::is_ascii_digit) {
            return Err(self.malformed(start, token));
        }

        let code = token
            .iter()
            .try_fold(0u32, |acc, &digit| {
                acc.checked_mul(10)?.checked_add(u32::from(digit - b'0'))
            })
            .ok_or_else(|| self.malformed(start, token))?;

        self.pos = start + len + 1;
        self.codes_read += 1;
        Ok(Some(code))
    }

    /// Number of codes read so far.
    pub fn codes_read(&self) -> usize {
        self.codes_read
    }

    fn malformed(&self, offset: usize, token: &[u8]) -> LzwError {
        LzwError::MalformedCode {
            offset,
            token: String::from_utf8_lossy(token).into_owned(),
        }
    }
}

/// Writer that appends codes to a decimal stream.
#[derive(Debug)]
pub struct CodeWriter {
    /// Output buffer.
    output: Vec<u8>,
    /// Separator byte.
    separator: u8,
}

impl CodeWriter {
    /// Create a new code writer.
    pub fn new(separator: u8) -> Self {
        Self {
            output: Vec::new(),
            separator,
        }
    }

    /// Append one code followed by the separator.
    pub fn write_code(&mut self, code: u32) {
        self.output.extend_from_slice(code.to_string().as_bytes());
        self.output.push(self.separator);
    }

    /// Get the output data.
    pub fn into_vec(self) -> Vec<u8> {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_stream_layout() {
        let mut writer = CodeWriter::new(b'~');
        writer.write_code(49);
        writer.write_code(256);
        writer.write_code(0);
        let data = writer.into_vec();
        assert_eq!(data, b"49~256~0~");

        let mut reader = CodeReader::new(&data, b'~');
        assert_eq!(reader.read_code().unwrap(), Some(49));
        assert_eq!(reader.read_code().unwrap(), Some(256));
        assert_eq!(reader.read_code().unwrap(), Some(0));
        assert_eq!(reader.read_code().unwrap(), None);
        assert_eq!(reader.codes_read(), 3);
    }

    #[test]
    fn test_missing_terminator() {
        let mut reader = CodeReader::new(b"12~34", b'~');
        assert_eq!(reader.read_code().unwrap(), Some(12));
        assert!(matches!(
            reader.read_code(),
            Err(LzwError::MalformedCode { offset: 3, .. })
        ));
    }

    #[test]
    fn test_bad_tokens() {
        for data in [&b"~"[..], b"1a~", b"-1~", b"99999999999~"] {
            let mut reader = CodeReader::new(data, b'~');
            assert!(
                matches!(reader.read_code(), Err(LzwError::MalformedCode { .. })),
                "{:?} should be rejected",
                String::from_utf8_lossy(data)
            );
        }
    }
}
