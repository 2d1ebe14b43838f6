//! Utility functions for the CLI.

use dialoguer::Password;
use glob::Pattern;
use idoarc_archive::{Archive, container};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// File extension of idoarc archives.
pub const ARCHIVE_EXTENSION: &str = "ido";

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let template = "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
    match ProgressStyle::default_bar().template(template) {
        Ok(style) => pb.set_style(style.progress_chars("█▓▒░ ")),
        Err(e) => log::debug!("progress bar template rejected: {}", e),
    }
    pb
}

/// Check if a path matches the filter patterns.
/// - If include patterns are specified, the path must match at least one
/// - If exclude patterns are specified, the path must not match any
pub fn matches_filters(name: &str, include: &[String], exclude: &[String]) -> bool {
    // Check exclude patterns first
    for pattern_str in exclude {
        if let Ok(pattern) = Pattern::new(pattern_str) {
            if pattern.matches(name) {
                return false;
            }
        }
    }

    // If no include patterns, include everything (that wasn't excluded)
    if include.is_empty() {
        return true;
    }

    include
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .any(|pattern| pattern.matches(name))
}

/// Returns true if the path carries the `.ido` extension.
pub fn has_archive_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(ARCHIVE_EXTENSION)
}

/// Open an archive file and make sure the caller may read it.
///
/// A protected archive without a supplied password prompts for one.
pub fn open_unlocked(
    path: &Path,
    password: Option<&str>,
) -> Result<Archive, Box<dyn std::error::Error>> {
    let archive = container::open(path)?;
    unlock(&archive, password)?;
    Ok(archive)
}

/// Verify the password of an already loaded archive, prompting if needed.
pub fn unlock(archive: &Archive, password: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    if !archive.is_protected() {
        return Ok(());
    }

    let prompted;
    let candidate = match password {
        Some(pw) => pw,
        None => {
            prompted = Password::new()
                .with_prompt("Protected archive. Password")
                .interact()?;
            prompted.as_str()
        }
    };
    archive.unlock(Some(candidate))?;
    Ok(())
}

/// Parse a comma separated list of 1-based entry numbers.
pub fn parse_indices(list: &str) -> Result<Vec<usize>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| format!("'{}' is not an entry number", s))
        })
        .collect()
}

/// Format a byte count for display.
pub fn format_size(size: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", size, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_filters() {
        let none: Vec<String> = Vec::new();
        assert!(matches_filters("a.txt", &none, &none));

        let include = vec!["*.txt".to_string()];
        assert!(matches_filters("a.txt", &include, &none));
        assert!(!matches_filters("a.bin", &include, &none));

        let exclude = vec!["docs/*".to_string()];
        assert!(!matches_filters("docs/a.txt", &include, &exclude));
        assert!(matches_filters("b.bin", &none, &exclude));
    }

    #[test]
    fn test_archive_extension() {
        assert!(has_archive_extension(Path::new("backup.ido")));
        assert!(has_archive_extension(Path::new("dir/backup.ido")));
        assert!(!has_archive_extension(Path::new("backup.zip")));
        assert!(!has_archive_extension(Path::new("backup")));
    }

    #[test]
    fn test_parse_indices() {
        assert_eq!(parse_indices("1,2").unwrap(), vec![1, 2]);
        assert_eq!(parse_indices(" 3 , 1 ,").unwrap(), vec![3, 1]);
        assert_eq!(parse_indices("0").unwrap(), vec![0]);
        assert!(parse_indices("1,x").is_err());
        assert!(parse_indices("-1").is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(10), "10 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_unlock_unprotected() {
        let archive = Archive::default();
        assert!(unlock(&archive, None).is_ok());
    }
}
