//! List command implementation.

use crate::utils::{format_size, matches_filters, open_unlocked};
use idoarc_archive::{Archive, decode};
use idoarc_core::Entry;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON serializable entry data for archive listings.
#[derive(Debug, Serialize, Deserialize)]
struct EntryJson {
    index: usize,
    path: String,
    codec: String,
    binary: bool,
    unit_size: usize,
    cap_size: usize,
    encoded_size: usize,
}

impl EntryJson {
    fn from_entry(index: usize, entry: &Entry) -> Self {
        Self {
            index,
            path: entry.path().to_string(),
            codec: entry.codec().name().to_string(),
            binary: entry.is_binary(),
            unit_size: entry.unit_size(),
            cap_size: entry.cap_size(),
            encoded_size: entry.encoded_size(),
        }
    }
}

/// JSON output for archive listing.
#[derive(Debug, Serialize, Deserialize)]
struct ArchiveListJson {
    archive: String,
    protected: bool,
    entries: Vec<EntryJson>,
}

/// Options for listing archive contents.
pub struct ListOptions<'a> {
    pub password: Option<&'a str>,
    pub verbose: bool,
    pub json: bool,
    pub include: &'a [String],
    pub exclude: &'a [String],
}

pub fn cmd_list(archive_path: &Path, options: &ListOptions) -> Result<(), Box<dyn std::error::Error>> {
    let archive = open_unlocked(archive_path, options.password)?;

    if options.json {
        println!("{}", list_json(archive_path, &archive, options)?);
        return Ok(());
    }

    println!(
        "Archive: {}{}",
        archive_path.display(),
        if archive.is_protected() { " (protected)" } else { "" }
    );
    println!();

    if options.verbose {
        print_verbose(&numbered(&archive, options));
    } else if options.include.is_empty() && options.exclude.is_empty() {
        print!("{}", archive.list_contents());
    } else {
        for (index, entry) in numbered(&archive, options) {
            println!("{} - {}", index, entry.path());
        }
    }

    Ok(())
}

/// Entries in listing order with their 1-based numbers, after filtering.
///
/// Numbers always come from the unfiltered listing so they stay valid for
/// `delete`.
fn numbered<'a>(archive: &'a Archive, options: &ListOptions) -> Vec<(usize, &'a Entry)> {
    archive
        .sorted_entries()
        .into_iter()
        .enumerate()
        .map(|(i, entry)| (i + 1, entry))
        .filter(|(_, entry)| {
            matches_filters(&entry.normalized_path(), options.include, options.exclude)
        })
        .collect()
}

fn list_json(
    archive_path: &Path,
    archive: &Archive,
    options: &ListOptions,
) -> Result<String, serde_json::Error> {
    let listing = ArchiveListJson {
        archive: archive_path.display().to_string(),
        protected: archive.is_protected(),
        entries: numbered(archive, options)
            .into_iter()
            .map(|(index, entry)| EntryJson::from_entry(index, entry))
            .collect(),
    };
    serde_json::to_string_pretty(&listing)
}

fn print_verbose(entries: &[(usize, &Entry)]) {
    println!(
        "{:>4}  {:>5} {:>6} {:>4} {:>4} {:>10} {:>10} {:>6}  Name",
        "No.", "Codec", "Type", "Unit", "Cap", "Original", "Encoded", "Ratio"
    );
    println!("{}", "-".repeat(72));

    let mut total_original = 0usize;
    let mut total_encoded = 0usize;

    for &(index, entry) in entries {
        let original = match decode(entry) {
            Ok(payload) => Some(payload.len()),
            Err(e) => {
                log::warn!("cannot decode {}: {}", entry.path(), e);
                None
            }
        };
        let (original_col, ratio_col) = match original {
            Some(size) => {
                total_original += size;
                (
                    format_size(size),
                    format!("{:.1}%", entry.compression_ratio(size) * 100.0),
                )
            }
            None => ("?".to_string(), "-".to_string()),
        };
        total_encoded += entry.encoded_size();

        println!(
            "{:>4}  {:>5} {:>6} {:>4} {:>4} {:>10} {:>10} {:>6}  {}",
            index,
            entry.codec().name(),
            if entry.is_binary() { "binary" } else { "text" },
            entry.unit_size(),
            entry.cap_size(),
            original_col,
            format_size(entry.encoded_size()),
            ratio_col,
            entry.path()
        );
    }

    println!("{}", "-".repeat(72));
    println!(
        "{:>29} {:>10} {:>10}         {} files",
        "",
        format_size(total_original),
        format_size(total_encoded),
        entries.len()
    );
}
