//! LZW dictionary (code table) management.

use crate::config::LzwConfig;
use crate::error::{LzwError, Result};
use std::collections::HashMap;

/// LZW dictionary for encoding and decoding.
///
/// The dictionary maintains a mapping between codes and byte sequences.
/// For encoding, we also maintain a reverse mapping (string -> code).
/// The table grows without bound; there is no clear code.
#[derive(Debug)]
pub struct LzwDictionary {
    /// Code table: code -> byte sequence.
    table: Vec<Vec<u8>>,
    /// Reverse lookup: byte sequence -> code (for encoding only).
    reverse: HashMap<Vec<u8>, u32>,
    /// Configuration.
    config: LzwConfig,
    /// Next available code.
    next_code: u32,
}

impl LzwDictionary {
    /// Create a new LZW dictionary with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;

        let mut dict = Self {
            table: Vec::new(),
            reverse: HashMap::new(),
            config,
            next_code: 0,
        };

        dict.reset();
        Ok(dict)
    }

    /// Reset the dictionary to its initial state.
    pub fn reset(&mut self) {
        self.table.clear();
        self.reverse.clear();

        // Initialize with single-byte codes (0-255)
        for i in 0..self.config.initial_codes() {
            let byte_seq = vec![i as u8];
            self.table.push(byte_seq.clone());
            self.reverse.insert(byte_seq, i);
        }

        self.next_code = self.config.initial_codes();
    }

    /// Add a new string to the dictionary (for encoding).
    ///
    /// Returns the assigned code.
    pub fn add_string(&mut self, string: Vec<u8>) -> u32 {
        let code = self.next_code;
        self.reverse.insert(string, code);
        self.next_code += 1;
        code
    }

    /// Add a string to the dictionary (for decoding).
    ///
    /// Similar to add_string but only fills the forward table.
    pub fn add_string_decode(&mut self, string: Vec<u8>) -> u32 {
        let code = self.next_code;
        self.table.push(string);
        self.next_code += 1;
        code
    }

    /// Get the byte sequence for a code.
    pub fn get_string(&self, code: u32) -> Result<&[u8]> {
        self.table
            .get(code as usize)
            .map(|v| v.as_slice())
            .ok_or(LzwError::InvalidCode(code))
    }

    /// Find the code for a byte sequence (for encoding).
    pub fn find_code(&self, string: &[u8]) -> Option<u32> {
        self.reverse.get(string).copied()
    }

    /// Get the next code that will be assigned.
    pub fn next_code(&self) -> u32 {
        self.next_code
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }
}
