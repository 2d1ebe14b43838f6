//! LZW decoder (decompression).
//!
//! The decoder rebuilds the encoder's dictionary one code behind it. A code
//! equal to the next code about to be assigned refers to the entry the
//! encoder created on its last step, which is always `previous + previous[0]`.

use crate::codes::CodeReader;
use crate::config::LzwConfig;
use crate::dictionary::LzwDictionary;
use crate::error::{LzwError, Result};

/// LZW decoder for decompression.
#[derive(Debug)]
pub struct LzwDecoder {
    /// Dictionary for code lookup.
    dict: LzwDictionary,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        let dict = LzwDictionary::new(config)?;
        Ok(Self { dict })
    }

    /// Decode an LZW code stream.
    ///
    /// # Errors
    ///
    /// - [`LzwError::EmptyStream`] if the stream holds no codes
    /// - [`LzwError::MalformedCode`] if a token is not a terminated decimal code
    /// - [`LzwError::InvalidCode`] for a code that is neither known nor the
    ///   next code to be assigned
    pub fn decode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.dict.reset();
        let mut reader = CodeReader::new(input, self.dict.config().separator);
        let mut output = Vec::with_capacity(input.len() * 2);

        let first = reader.read_code()?.ok_or(LzwError::EmptyStream)?;
        let mut previous = self.dict.get_string(first)?.to_vec();
        output.extend_from_slice(&previous);

        while let Some(code) = reader.read_code()? {
            let string = if code < self.dict.next_code() {
                // Code exists in dictionary - this is the common case
                self.dict.get_string(code)?.to_vec()
            } else if code == self.dict.next_code() {
                // Special case: code not yet in dictionary
                // This happens when we have a pattern like "ABABAB..."
                let mut new_string = previous.clone();
                new_string.push(previous[0]);
                new_string
            } else {
                return Err(LzwError::InvalidCode(code));
            };

            output.extend_from_slice(&string);

            let mut new_entry = previous;
            new_entry.push(string[0]);
            self.dict.add_string_decode(new_entry);

            previous = string;
        }

        log::trace!(
            "lzw: decoded {} codes into {} bytes",
            reader.codes_read(),
            output.len()
        );
        Ok(output)
    }

    /// Reset the decoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}
