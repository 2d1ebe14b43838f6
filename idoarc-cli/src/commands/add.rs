//! Add command implementation.

use crate::utils::{format_size, has_archive_extension, unlock};
use idoarc_archive::{Archive, EncodeParams, container, encode};
use idoarc_core::{CodecKind, Entry, Payload};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Archive file name used when the target is a directory.
pub const DEFAULT_ARCHIVE_NAME: &str = "Archive.ido";

/// Options for adding files to an archive.
pub struct AddOptions<'a> {
    pub codec: CodecKind,
    pub params: EncodeParams,
    pub password: Option<&'a str>,
    pub replace: bool,
    pub verbose: bool,
}

/// A file found on disk and the path it gets inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub source: PathBuf,
    pub archive_path: String,
}

pub fn cmd_add(
    archive: &Path,
    files: &[PathBuf],
    options: &AddOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    options.params.validate()?;
    let target = resolve_target(archive)?;

    if options.replace && target.exists() {
        fs::remove_file(&target)?;
        log::debug!("removed existing archive {}", target.display());
    }

    let mut archive = if target.exists() {
        let existing = container::open(&target)?;
        unlock(&existing, options.password)?;
        existing
    } else {
        Archive::new(Vec::new(), options.password)?
    };

    let skip = target.canonicalize().ok();
    let inputs = collect_inputs(files)?;

    let mut added = 0usize;
    for input in &inputs {
        if skip.is_some() && input.source.canonicalize().ok() == skip {
            continue;
        }

        let Some((entry, original_size)) = encode_file(input, options)? else {
            println!("  Skipped: {} (empty file)", input.archive_path);
            continue;
        };

        if options.verbose {
            println!(
                "  Added: {} ({} -> {}, {})",
                entry.path(),
                format_size(original_size),
                format_size(entry.encoded_size()),
                entry.codec()
            );
        }
        archive.add(entry);
        added += 1;
    }

    container::save(&archive, &target)?;
    println!(
        "{} file(s) added to {} ({} entries)",
        added,
        target.display(),
        archive.len()
    );
    Ok(())
}

/// Decide which file the archive lives in.
///
/// A directory gets a default archive name inside it. Anything else must
/// carry the `.ido` extension.
fn resolve_target(archive: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if archive.is_dir() {
        return Ok(archive.join(DEFAULT_ARCHIVE_NAME));
    }
    if !has_archive_extension(archive) {
        return Err(format!("{} is not a .ido archive", archive.display()).into());
    }
    Ok(archive.to_path_buf())
}

/// Files ending in `.txt` are stored as text, everything else as bytes.
pub fn is_text_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("txt")
}

/// Read and encode one input file. Empty files yield `None`.
fn encode_file(
    input: &InputFile,
    options: &AddOptions,
) -> Result<Option<(Entry, usize)>, Box<dyn std::error::Error>> {
    let bytes = fs::read(&input.source)?;
    if bytes.is_empty() {
        return Ok(None);
    }
    let original_size = bytes.len();

    let payload = if is_text_file(&input.source) {
        match String::from_utf8(bytes) {
            Ok(text) => Payload::Text(text),
            Err(e) => {
                log::warn!(
                    "{} is not valid UTF-8, storing it as binary",
                    input.source.display()
                );
                Payload::Binary(e.into_bytes())
            }
        }
    } else {
        Payload::Binary(bytes)
    };

    let entry = encode(
        options.codec,
        payload,
        input.archive_path.clone(),
        options.params,
    )?;
    Ok(Some((entry, original_size)))
}

/// Expand the command line paths into the files to archive.
///
/// A plain file is stored under its file name. A folder is walked
/// recursively and its files are stored as `<folder>/<relative path>`.
pub fn collect_inputs(paths: &[PathBuf]) -> io::Result<Vec<InputFile>> {
    let mut inputs = Vec::new();
    for path in paths {
        if !path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }
        walk(path, entry_name(path)?, &mut inputs)?;
    }
    Ok(inputs)
}

fn walk(path: &Path, archive_path: String, inputs: &mut Vec<InputFile>) -> io::Result<()> {
    if path.is_dir() {
        let mut children = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        children.sort();

        for child in children {
            let name = entry_name(&child)?;
            walk(&child, format!("{}/{}", archive_path, name), inputs)?;
        }
    } else {
        inputs.push(InputFile {
            source: path.to_path_buf(),
            archive_path,
        });
    }
    Ok(())
}

/// Last component of a path, resolving `.` and `..` to real names.
fn entry_name(path: &Path) -> io::Result<String> {
    let name = match path.file_name() {
        Some(name) => name.to_owned(),
        None => path
            .canonicalize()?
            .file_name()
            .map(|n| n.to_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("cannot archive {}", path.display()),
                )
            })?,
    };
    Ok(name.to_string_lossy().into_owned())
}
