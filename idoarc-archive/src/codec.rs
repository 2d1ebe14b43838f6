//! Codec dispatch.
//!
//! Turns a payload into an [`Entry`] with the selected codec and back again.
//! The codec is chosen by matching on [`CodecKind`]; an entry always decodes
//! with the codec recorded in its tag.

use idoarc_core::{CodecKind, Entry, IdoArcError, Payload, Result};
use idoarc_lzw::LzwError;
use idoarc_rle::RleConfig;

/// Encoding parameters carried into every entry.
///
/// `unit_size` is the RLE window width and `cap_size` the largest count a
/// single RLE record may hold. LZW ignores both but they are still validated
/// and recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeParams {
    /// RLE window width in symbols.
    pub unit_size: usize,
    /// Maximum run count per RLE record.
    pub cap_size: usize,
}

impl EncodeParams {
    /// Default parameters: 5-symbol windows, counts up to 99.
    pub const DEFAULT: Self = Self {
        unit_size: 5,
        cap_size: 99,
    };

    /// Create encoding parameters.
    pub fn new(unit_size: usize, cap_size: usize) -> Self {
        Self {
            unit_size,
            cap_size,
        }
    }

    /// Check that both sizes are positive.
    pub fn validate(&self) -> Result<()> {
        self.rle_config().validate()
    }

    fn rle_config(&self) -> RleConfig {
        RleConfig::new(self.unit_size, self.cap_size)
    }
}

impl Default for EncodeParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Encode a payload into an entry.
///
/// RLE text is encoded char by char and `unit_size` counts chars. LZW text
/// is encoded over its UTF-8 bytes, so a char outside ASCII becomes one code
/// per byte: `"é"` is stored as `195~169~`, not as the single code `233~`.
///
/// # Errors
///
/// - [`IdoArcError::EmptyInput`] for an empty payload
/// - [`IdoArcError::InvalidUnitSize`] / [`IdoArcError::InvalidCapSize`] for
///   non-positive parameters
///
/// # Example
///
/// ```rust
/// use idoarc_archive::{EncodeParams, decode, encode};
/// use idoarc_core::{CodecKind, Payload};
///
/// let entry = encode(CodecKind::Rle, "aaa111", "a.txt", EncodeParams::DEFAULT).unwrap();
/// assert_eq!(entry.data(), b"01aaa11011");
/// assert_eq!(decode(&entry).unwrap(), Payload::from("aaa111"));
/// ```
pub fn encode(
    kind: CodecKind,
    payload: impl Into<Payload>,
    path: impl Into<String>,
    params: EncodeParams,
) -> Result<Entry> {
    let payload = payload.into();
    if payload.is_empty() {
        return Err(IdoArcError::EmptyInput);
    }
    params.validate()?;

    let config = params.rle_config();
    let data = match (kind, &payload) {
        (CodecKind::Rle, Payload::Binary(bytes)) => idoarc_rle::encode_bytes(bytes, &config)?,
        (CodecKind::Rle, Payload::Text(text)) => {
            idoarc_rle::encode_text(text, &config)?.into_bytes()
        }
        (CodecKind::Lzw, payload) => {
            idoarc_lzw::compress_standard(payload.as_bytes()).map_err(from_lzw)?
        }
    };

    let entry = Entry::new(
        data,
        payload.is_binary(),
        params.unit_size,
        path,
        kind,
        params.cap_size,
    )?;
    log::debug!(
        "encoded {} ({} bytes) with {} into {} bytes",
        entry.path(),
        payload.len(),
        kind,
        entry.encoded_size()
    );
    Ok(entry)
}

/// Decode an entry with the codec named by its tag.
///
/// Binary entries decode to [`Payload::Binary`], text entries to
/// [`Payload::Text`].
pub fn decode(entry: &Entry) -> Result<Payload> {
    match entry.codec() {
        CodecKind::Rle => decode_rle(entry),
        CodecKind::Lzw => decode_lzw(entry),
    }
}

/// Decode an entry, insisting that it was written by `kind`.
///
/// # Errors
///
/// [`IdoArcError::TypeMismatch`] if the entry carries another codec tag.
pub fn decode_as(kind: CodecKind, entry: &Entry) -> Result<Payload> {
    if entry.codec() != kind {
        return Err(IdoArcError::type_mismatch(format!(
            "{} is a {} entry, not {}",
            entry.path(),
            entry.codec(),
            kind
        )));
    }
    decode(entry)
}

fn decode_rle(entry: &Entry) -> Result<Payload> {
    let config = RleConfig::new(entry.unit_size(), entry.cap_size());
    if entry.is_binary() {
        return Ok(Payload::Binary(idoarc_rle::decode_bytes(entry.data(), &config)?));
    }

    let text = std::str::from_utf8(entry.data()).map_err(|e| {
        IdoArcError::corrupted(e.valid_up_to(), "RLE text payload is not valid UTF-8")
    })?;
    Ok(Payload::Text(idoarc_rle::decode_text(text, &config)?))
}

fn decode_lzw(entry: &Entry) -> Result<Payload> {
    let bytes = idoarc_lzw::decompress_standard(entry.data()).map_err(from_lzw)?;
    if entry.is_binary() {
        return Ok(Payload::Binary(bytes));
    }

    String::from_utf8(bytes).map(Payload::Text).map_err(|_| {
        IdoArcError::type_mismatch(format!(
            "{} is a text entry but decodes to non UTF-8 bytes",
            entry.path()
        ))
    })
}

fn from_lzw(err: LzwError) -> IdoArcError {
    match err {
        LzwError::InvalidCode(code) => IdoArcError::BadCompressedCode { code },
        LzwError::MalformedCode { offset, token } => {
            IdoArcError::corrupted(offset, format!("malformed LZW code {:?}", token))
        }
        LzwError::EmptyStream => IdoArcError::corrupted(0, "empty LZW code stream"),
        LzwError::InvalidSeparator(sep) => {
            IdoArcError::corrupted(0, format!("invalid LZW separator 0x{:02x}", sep))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rle_text_scenario() {
        let entry = encode(CodecKind::Rle, "aaa111", "a.txt", EncodeParams::DEFAULT).unwrap();
        assert_eq!(entry.data(), b"01aaa11011");
        assert!(!entry.is_binary());
        assert_eq!(entry.unit_size(), 5);
        assert_eq!(entry.cap_size(), 99);
        assert_eq!(entry.codec(), CodecKind::Rle);
    }

    #[test]
    fn test_rle_binary_scenario() {
        let entry = encode(
            CodecKind::Rle,
            b"111222333".to_vec(),
            "b.bin",
            EncodeParams::new(3, 99),
        )
        .unwrap();
        assert_eq!(entry.data(), b"011110122201333");
        assert!(entry.is_binary());
        assert_eq!(
            decode(&entry).unwrap(),
            Payload::Binary(b"111222333".to_vec())
        );
    }

    #[test]
    fn test_lzw_scenario() {
        let entry = encode(
            CodecKind::Lzw,
            "TOBEORNOTTOBEORTOBEORNOT",
            "t.txt",
            EncodeParams::DEFAULT,
        )
        .unwrap();
        assert_eq!(
            entry.data(),
            b"84~79~66~69~79~82~78~79~84~256~258~260~265~259~261~263~"
        );
        assert_eq!(
            decode(&entry).unwrap(),
            Payload::from("TOBEORNOTTOBEORTOBEORNOT")
        );
    }

    #[test]
    fn test_lzw_binary() {
        let data: Vec<u8> = (0..=255u8).chain(0..=255u8).collect();
        let entry = encode(CodecKind::Lzw, data.clone(), "x", EncodeParams::DEFAULT).unwrap();
        assert!(entry.is_binary());
        assert_eq!(decode(&entry).unwrap(), Payload::Binary(data));
    }

    #[test]
    fn test_preconditions() {
        for kind in CodecKind::ALL {
            assert!(matches!(
                encode(kind, "", "e.txt", EncodeParams::DEFAULT),
                Err(IdoArcError::EmptyInput)
            ));
            assert!(matches!(
                encode(kind, Vec::new(), "e", EncodeParams::DEFAULT),
                Err(IdoArcError::EmptyInput)
            ));
            assert!(matches!(
                encode(kind, "abc", "a.txt", EncodeParams::new(0, 99)),
                Err(IdoArcError::InvalidUnitSize(0))
            ));
            assert!(matches!(
                encode(kind, "abc", "a.txt", EncodeParams::new(5, 0)),
                Err(IdoArcError::InvalidCapSize(0))
            ));
        }
    }

    #[test]
    fn test_decode_as_mismatch() {
        let entry = encode(CodecKind::Lzw, "abc", "a.txt", EncodeParams::DEFAULT).unwrap();
        assert!(matches!(
            decode_as(CodecKind::Rle, &entry),
            Err(IdoArcError::TypeMismatch { .. })
        ));
        assert_eq!(
            decode_as(CodecKind::Lzw, &entry).unwrap(),
            Payload::from("abc")
        );
    }

    #[test]
    fn test_bad_lzw_code() {
        let entry = Entry::new(b"65~300~".to_vec(), true, 5, "x", CodecKind::Lzw, 99).unwrap();
        assert!(matches!(
            decode(&entry),
            Err(IdoArcError::BadCompressedCode { code: 300 })
        ));

        let entry = Entry::new(b"65~6x~".to_vec(), true, 5, "x", CodecKind::Lzw, 99).unwrap();
        assert!(matches!(
            decode(&entry),
            Err(IdoArcError::CorruptedData { .. })
        ));
    }

    #[test]
    fn test_lzw_text_not_utf8() {
        let entry = Entry::new(b"255~".to_vec(), false, 5, "x.txt", CodecKind::Lzw, 99).unwrap();
        assert!(matches!(
            decode(&entry),
            Err(IdoArcError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_rle_decode_uses_entry_params() {
        let entry = encode(
            CodecKind::Rle,
            "xyxyxyxyxy",
            "r.txt",
            EncodeParams::new(2, 3),
        )
        .unwrap();
        assert_eq!(entry.data(), b"3xy1xy1xy");
        assert_eq!(decode(&entry).unwrap(), Payload::from("xyxyxyxyxy"));
    }

    #[test]
    fn test_unicode_text() {
        for kind in CodecKind::ALL {
            let entry = encode(kind, "héllo wörld ✓✓✓", "u.txt", EncodeParams::new(1, 9)).unwrap();
            assert_eq!(decode(&entry).unwrap(), Payload::from("héllo wörld ✓✓✓"));
        }
    }

    #[test]
    fn test_lzw_text_uses_utf8_bytes() {
        let entry = encode(CodecKind::Lzw, "café", "c.txt", EncodeParams::DEFAULT).unwrap();
        assert_eq!(entry.data(), b"99~97~102~195~169~");
        assert_eq!(decode(&entry).unwrap(), Payload::from("café"));
    }
}
