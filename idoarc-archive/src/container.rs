//! Container format.
//!
//! An archive file is laid out as:
//!
//! ```text
//! +----------------------+----------+----------+-----+
//! | password slot (48 B) | record 1 | record 2 | ... |
//! +----------------------+----------+----------+-----+
//! ```
//!
//! The password slot holds the [`PasswordDigest`] of a protected archive, or
//! 48 zero bytes for an unprotected one. Each record is six length-prefixed
//! fields, every length a little-endian `u32`:
//!
//! | # | Field     | Content                        |
//! |---|-----------|--------------------------------|
//! | 1 | data      | encoded payload                |
//! | 2 | binary    | `0` or `1`                     |
//! | 3 | unit size | ASCII decimal                  |
//! | 4 | path      | UTF-8, `/` separated           |
//! | 5 | codec     | `RLE` or `LZW`                 |
//! | 6 | cap size  | ASCII decimal                  |
//!
//! No field may be empty. Field bytes are never interpreted as framing, so
//! payloads may contain any byte sequence.

use crate::archive::Archive;
use crate::password::{DIGEST_LEN, PasswordDigest};
use idoarc_core::{CodecKind, Entry, IdoArcError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Size of the password slot at the start of the container.
pub const PASSWORD_SLOT_LEN: usize = DIGEST_LEN;

/// Number of fields in one record.
pub const FIELDS_PER_RECORD: usize = 6;

/// Size of a field length prefix.
const LENGTH_PREFIX: usize = 4;

const SENTINEL: [u8; PASSWORD_SLOT_LEN] = [0; PASSWORD_SLOT_LEN];

/// Serialize an archive to bytes.
pub fn write(archive: &Archive) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(
        PASSWORD_SLOT_LEN
            + archive
                .entries()
                .map(|e| e.encoded_size() + e.path().len() + 32)
                .sum::<usize>(),
    );
    write_to(archive, &mut out)?;
    Ok(out)
}

/// Serialize an archive into a writer.
pub fn write_to<W: Write>(archive: &Archive, writer: &mut W) -> Result<()> {
    match archive.digest() {
        Some(digest) => writer.write_all(digest.as_bytes())?,
        None => writer.write_all(&SENTINEL)?,
    }

    for entry in archive.entries() {
        let binary: &[u8] = if entry.is_binary() { b"1" } else { b"0" };
        write_field(writer, entry.data())?;
        write_field(writer, binary)?;
        write_field(writer, entry.unit_size().to_string().as_bytes())?;
        write_field(writer, entry.path().as_bytes())?;
        write_field(writer, entry.codec().name().as_bytes())?;
        write_field(writer, entry.cap_size().to_string().as_bytes())?;
    }

    log::debug!(
        "wrote container with {} entries (protected: {})",
        archive.len(),
        archive.is_protected()
    );
    Ok(())
}

fn write_field<W: Write>(writer: &mut W, field: &[u8]) -> Result<()> {
    let len = u32::try_from(field.len()).map_err(|_| {
        IdoArcError::corrupt_container(0, format!("field of {} bytes is too large", field.len()))
    })?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(field)?;
    Ok(())
}

/// Parse an archive from bytes.
///
/// # Errors
///
/// [`IdoArcError::CorruptContainer`] if the bytes are not a well-formed
/// container. The offset points at the field where parsing stopped.
pub fn read(data: &[u8]) -> Result<Archive> {
    let slot = data.get(..PASSWORD_SLOT_LEN).ok_or_else(|| {
        IdoArcError::corrupt_container(data.len(), "truncated password slot")
    })?;
    let digest = if slot == SENTINEL {
        None
    } else {
        PasswordDigest::from_slice(slot)
    };

    let mut fields = FieldReader {
        data,
        pos: PASSWORD_SLOT_LEN,
    };
    let mut entries = Vec::new();
    while !fields.is_done() {
        entries.push(fields.read_entry()?);
    }

    log::debug!(
        "read container with {} records (protected: {})",
        entries.len(),
        digest.is_some()
    );
    Ok(Archive::from_digest(entries, digest))
}

/// Check whether bytes form a well-formed container.
pub fn is_valid(data: &[u8]) -> bool {
    match read(data) {
        Ok(_) => true,
        Err(e) => {
            log::debug!("container rejected: {}", e);
            false
        }
    }
}

/// Write an archive to a file.
pub fn save(archive: &Archive, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_to(archive, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Read an archive from a file.
pub fn open(path: impl AsRef<Path>) -> Result<Archive> {
    let data = std::fs::read(path.as_ref())?;
    read(&data)
}

/// Cursor over the length-prefixed fields that follow the password slot.
struct FieldReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    fn is_done(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn read_field(&mut self, name: &str) -> Result<&'a [u8]> {
        let start = self.pos;
        let prefix = self
            .data
            .get(start..start + LENGTH_PREFIX)
            .ok_or_else(|| {
                IdoArcError::corrupt_container(start, format!("truncated length of {}", name))
            })?;
        let len = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
        if len == 0 {
            return Err(IdoArcError::corrupt_container(
                start,
                format!("empty {} field", name),
            ));
        }

        let body = start + LENGTH_PREFIX;
        let field = body
            .checked_add(len)
            .and_then(|end| self.data.get(body..end))
            .ok_or_else(|| {
                IdoArcError::corrupt_container(start, format!("truncated {} field", name))
            })?;
        self.pos = body + len;
        Ok(field)
    }

    fn read_entry(&mut self) -> Result<Entry> {
        let record = self.pos;

        let data = self.read_field("data")?;

        let at = self.pos;
        let binary = match self.read_field("binary")? {
            b"0" => false,
            b"1" => true,
            other => {
                return Err(IdoArcError::corrupt_container(
                    at,
                    format!("binary flag must be 0 or 1, got {:?}", String::from_utf8_lossy(other)),
                ));
            }
        };

        let at = self.pos;
        let unit_size = parse_decimal(self.read_field("unit size")?, at)?;

        let at = self.pos;
        let path = std::str::from_utf8(self.read_field("path")?)
            .map_err(|_| IdoArcError::corrupt_container(at, "path is not valid UTF-8"))?;

        let at = self.pos;
        let codec_field = self.read_field("codec")?;
        let codec: CodecKind = std::str::from_utf8(codec_field)
            .ok()
            .and_then(|name| name.parse().ok())
            .ok_or_else(|| {
                IdoArcError::corrupt_container(
                    at,
                    format!("unknown codec {:?}", String::from_utf8_lossy(codec_field)),
                )
            })?;

        let at = self.pos;
        let cap_size = parse_decimal(self.read_field("cap size")?, at)?;

        Entry::new(data.to_vec(), binary, unit_size, path, codec, cap_size)
            .map_err(|e| IdoArcError::corrupt_container(record, e.to_string()))
    }
}

fn parse_decimal(field: &[u8], offset: usize) -> Result<usize> {
    if !field.iter().all(u8::is_ascii_digit) {
        return Err(IdoArcError::corrupt_container(
            offset,
            format!("{:?} is not a decimal number", String::from_utf8_lossy(field)),
        ));
    }
    std::str::from_utf8(field)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| IdoArcError::corrupt_container(offset, "decimal field overflows"))
}
