//! Delete command implementation.

use crate::utils::{open_unlocked, parse_indices};
use idoarc_archive::container;
use std::path::Path;

pub fn cmd_delete(
    archive_path: &Path,
    indices: &str,
    password: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut archive = open_unlocked(archive_path, password)?;
    let indices = parse_indices(indices)?;
    if indices.is_empty() {
        return Err("no entry numbers given".into());
    }

    let before = archive.len();
    if !archive.delete(&indices) {
        return Err(format!(
            "entry numbers must be between 1 and {}; archive left unchanged",
            before
        )
        .into());
    }

    container::save(&archive, archive_path)?;
    println!(
        "Deleted {} entries from {} ({} remain)",
        before - archive.len(),
        archive_path.display(),
        archive.len()
    );
    Ok(())
}
