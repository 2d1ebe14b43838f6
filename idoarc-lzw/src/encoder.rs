//! LZW encoder (compression).

use crate::codes::CodeWriter;
use crate::config::LzwConfig;
use crate::dictionary::LzwDictionary;
use crate::error::Result;

/// LZW encoder for compression.
#[derive(Debug)]
pub struct LzwEncoder {
    /// Dictionary for string lookup.
    dict: LzwDictionary,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        let dict = LzwDictionary::new(config)?;
        Ok(Self { dict })
    }

    /// Encode data with LZW compression.
    ///
    /// # Algorithm
    ///
    /// 1. Initialize dictionary with single-byte codes (0-255)
    /// 2. Read input byte by byte
    /// 3. Build longest matching string in dictionary
    /// 4. Output code for that string
    /// 5. Add string + next byte to dictionary (codes from 256 up)
    /// 6. Repeat until all input processed, then output the final code
    ///
    /// Empty input produces an empty stream.
    pub fn encode(&mut self, input: &[u8]) -> Vec<u8> {
        self.dict.reset();
        let mut writer = CodeWriter::new(self.dict.config().separator);

        let Some((&first, rest)) = input.split_first() else {
            return writer.into_vec();
        };

        // Current string being built, and its code
        let mut current = vec![first];
        let mut current_code = u32::from(first);

        for &byte in rest {
            current.push(byte);

            if let Some(code) = self.dict.find_code(&current) {
                // String exists in dictionary - continue building
                current_code = code;
            } else {
                writer.write_code(current_code);
                self.dict.add_string(current);

                // Start new string with current byte
                current = vec![byte];
                current_code = u32::from(byte);
            }
        }

        writer.write_code(current_code);
        log::trace!(
            "lzw: encoded {} bytes, dictionary grew to {} codes",
            input.len(),
            self.dict.next_code()
        );
        writer.into_vec()
    }

    /// Reset the encoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}
