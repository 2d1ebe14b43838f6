//! Extract command implementation.

use crate::utils::{create_progress_bar, matches_filters, open_unlocked};
use idoarc_archive::decode;
use idoarc_core::Entry;
use std::fs;
use std::path::Path;

/// Options for extracting an archive.
pub struct ExtractOptions<'a> {
    pub password: Option<&'a str>,
    pub include: &'a [String],
    pub exclude: &'a [String],
    pub verbose: bool,
    pub progress: bool,
}

pub fn cmd_extract(
    archive: &Path,
    output: &Path,
    options: &ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let archive = open_unlocked(archive, options.password)?;

    let entries: Vec<&Entry> = archive
        .sorted_entries()
        .into_iter()
        .filter(|e| matches_filters(&e.normalized_path(), options.include, options.exclude))
        .collect();

    // Refuse the whole archive before writing anything if one path escapes
    for entry in &entries {
        entry.validate_path()?;
    }

    let pb = create_progress_bar(entries.len() as u64, options.progress);
    pb.set_message("files");

    for entry in &entries {
        let payload = decode(entry)?;
        let out_path = output.join(entry.native_path());
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, payload.as_bytes())?;

        if options.verbose {
            pb.println(format!(
                "  Extracted: {} ({} bytes)",
                entry.path(),
                payload.len()
            ));
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    println!(
        "Extracted {} file(s) to {}",
        entries.len(),
        output.display()
    );
    Ok(())
}
