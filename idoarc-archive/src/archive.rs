//! The archive entity.
//!
//! An [`Archive`] is a password-gated collection of [`Entry`] values keyed by
//! their normalized path. Adding an entry whose path is already present
//! replaces the old one. Listing and deletion work on the entries sorted by
//! path, numbered from 1.

use crate::password::{Argon2Hasher, PasswordDigest, PasswordHasher, Protection};
use idoarc_core::{Entry, IdoArcError, Result, normalize_path};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::Path;

/// A collection of encoded entries with optional password protection.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    entries: IndexMap<String, Entry>,
    protection: Protection,
}

impl Archive {
    /// Create an archive, hashing `password` with the default Argon2 hasher.
    ///
    /// `None` produces an unprotected archive. An empty string is still a
    /// password and produces a protected archive.
    pub fn new(entries: Vec<Entry>, password: Option<&str>) -> Result<Self> {
        Self::with_hasher(entries, password, &Argon2Hasher::default())
    }

    /// Create an archive using a specific password hasher.
    pub fn with_hasher<H: PasswordHasher + ?Sized>(
        entries: Vec<Entry>,
        password: Option<&str>,
        hasher: &H,
    ) -> Result<Self> {
        let digest = password.map(|pw| hasher.hash(pw)).transpose()?;
        Ok(Self::from_digest(entries, digest))
    }

    /// Create an archive from an already computed digest.
    pub fn from_digest(entries: Vec<Entry>, digest: Option<PasswordDigest>) -> Self {
        let mut archive = Self {
            entries: IndexMap::with_capacity(entries.len()),
            protection: Protection::from(digest),
        };
        archive.extend(entries);
        archive
    }

    /// Create an unprotected archive.
    pub fn unprotected(entries: Vec<Entry>) -> Self {
        Self::from_digest(entries, None)
    }

    /// Protection state.
    pub fn protection(&self) -> &Protection {
        &self.protection
    }

    /// Returns true if reading requires a password.
    pub fn is_protected(&self) -> bool {
        self.protection.is_protected()
    }

    /// Stored password digest, if protected.
    pub fn digest(&self) -> Option<&PasswordDigest> {
        self.protection.digest()
    }

    /// Check a candidate password with the default Argon2 hasher.
    pub fn check_password(&self, candidate: Option<&str>) -> bool {
        self.check_password_with(&Argon2Hasher::default(), candidate)
    }

    /// Check a candidate password.
    ///
    /// An unprotected archive accepts any candidate. A protected archive
    /// rejects a missing candidate.
    pub fn check_password_with<H: PasswordHasher + ?Sized>(
        &self,
        hasher: &H,
        candidate: Option<&str>,
    ) -> bool {
        match (&self.protection, candidate) {
            (Protection::Unprotected, _) => true,
            (Protection::Protected(_), None) => false,
            (Protection::Protected(digest), Some(pw)) => hasher.verify(pw, digest),
        }
    }

    /// Like [`check_password`](Self::check_password) but fails with
    /// [`IdoArcError::WrongPassword`].
    pub fn unlock(&self, candidate: Option<&str>) -> Result<()> {
        self.unlock_with(&Argon2Hasher::default(), candidate)
    }

    /// Like [`check_password_with`](Self::check_password_with) but fails with
    /// [`IdoArcError::WrongPassword`].
    pub fn unlock_with<H: PasswordHasher + ?Sized>(
        &self,
        hasher: &H,
        candidate: Option<&str>,
    ) -> Result<()> {
        if self.check_password_with(hasher, candidate) {
            Ok(())
        } else {
            log::warn!("password check failed");
            Err(IdoArcError::WrongPassword)
        }
    }

    /// Add an entry, replacing any entry with the same normalized path.
    ///
    /// The added entry always becomes the last in insertion order.
    pub fn add(&mut self, entry: Entry) {
        let key = entry.normalized_path();
        if self.entries.shift_remove(&key).is_some() {
            log::debug!("replacing entry {}", key);
        }
        self.entries.insert(key, entry);
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &Entry> + ExactSizeIterator {
        self.entries.values()
    }

    /// Consume the archive and return its entries in insertion order.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries.into_values().collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the archive holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by path. Either separator style matches.
    pub fn get(&self, path: &str) -> Option<&Entry> {
        self.entries.get(&normalize_path(path))
    }

    /// Returns true if an entry with this path exists.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(&normalize_path(path))
    }

    /// Entries sorted by path.
    ///
    /// Paths compare component by component, so `a/b` sorts before `a-b`.
    pub fn sorted_entries(&self) -> Vec<&Entry> {
        let mut sorted: Vec<(&String, &Entry)> = self.entries.iter().collect();
        sorted.sort_by(|(a, _), (b, _)| Path::new(a).cmp(Path::new(b)).then_with(|| a.cmp(b)));
        sorted.into_iter().map(|(_, entry)| entry).collect()
    }

    /// Entry paths in sorted order.
    pub fn sorted_paths(&self) -> Vec<&str> {
        self.sorted_entries().into_iter().map(Entry::path).collect()
    }

    /// Numbered listing, one `"<n> - <path>"` line per entry.
    pub fn list_contents(&self) -> String {
        self.sorted_paths()
            .into_iter()
            .enumerate()
            .map(|(i, path)| format!("{} - {}\n", i + 1, path))
            .collect()
    }

    /// Delete entries by their 1-based position in the sorted listing.
    ///
    /// All indices are checked first. If any is out of range nothing is
    /// removed and `false` is returned.
    pub fn delete(&mut self, indices: &[usize]) -> bool {
        let len = self.len();
        if let Some(bad) = indices.iter().find(|&&i| i == 0 || i > len) {
            log::warn!("delete index {} out of range 1..={}", bad, len);
            return false;
        }

        let doomed: HashSet<String> = {
            let sorted = self.sorted_entries();
            indices
                .iter()
                .map(|&i| sorted[i - 1].normalized_path())
                .collect()
        };
        self.entries.retain(|key, _| !doomed.contains(key));
        log::debug!("deleted {} entries, {} remain", doomed.len(), self.len());
        true
    }
}

impl Extend<Entry> for Archive {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        for entry in iter {
            self.add(entry);
        }
    }
}

impl PartialEq for Archive {
    fn eq(&self, other: &Self) -> bool {
        self.protection == other.protection
            && self.len() == other.len()
            && self.entries().zip(other.entries()).all(|(a, b)| a == b)
    }
}

impl Eq for Archive {}

#[cfg(test)]
mod tests {
    use super::*;
    use idoarc_core::CodecKind;

    fn entry(path: &str) -> Entry {
        Entry::new(b"01a".to_vec(), false, 1, path, CodecKind::Rle, 99).unwrap()
    }

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::with_params(8, 1, 1).unwrap()
    }

    fn six() -> Archive {
        Archive::unprotected(
            ["f.txt", "b.txt", "d.txt", "a.txt", "e.txt", "c.txt"]
                .into_iter()
                .map(entry)
                .collect(),
        )
    }

    #[test]
    fn test_upsert_by_path() {
        let mut archive = Archive::unprotected(vec![entry("a.txt"), entry("b.txt")]);
        let replacement = Entry::new(b"02b".to_vec(), false, 1, "a.txt", CodecKind::Rle, 99).unwrap();
        archive.add(replacement.clone());

        assert_eq!(archive.len(), 2);
        assert_eq!(archive.get("a.txt"), Some(&replacement));
        // The replacement moves to the end
        assert_eq!(archive.entries().last(), Some(&replacement));
    }

    #[test]
    fn test_upsert_normalizes_separators() {
        let mut archive = Archive::default();
        archive.add(entry("dir\\x.txt"));
        archive.add(entry("dir/x.txt"));
        assert_eq!(archive.len(), 1);
        assert!(archive.contains("dir\\x.txt"));
        assert_eq!(archive.get("dir/x.txt").map(Entry::path), Some("dir/x.txt"));
    }

    #[test]
    fn test_sorted_listing() {
        let archive = six();
        assert_eq!(
            archive.sorted_paths(),
            vec!["a.txt", "b.txt", "c.txt", "d.txt", "e.txt", "f.txt"]
        );
        assert!(archive.list_contents().starts_with("1 - a.txt\n2 - b.txt\n"));
        assert_eq!(archive.list_contents().lines().count(), 6);
    }

    #[test]
    fn test_sort_is_component_wise() {
        let archive = Archive::unprotected(vec![entry("a-b.txt"), entry("a/b.txt")]);
        assert_eq!(archive.sorted_paths(), vec!["a/b.txt", "a-b.txt"]);
    }

    #[test]
    fn test_listing_independent_of_add_order() {
        let forward = six();
        let mut reversed = Archive::default();
        reversed.extend(forward.entries().rev().cloned());
        assert_eq!(forward.list_contents(), reversed.list_contents());
        // Insertion order differs, so the archives do not compare equal
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_delete() {
        let mut archive = six();
        assert!(archive.delete(&[1, 2]));
        assert_eq!(archive.sorted_paths(), vec!["c.txt", "d.txt", "e.txt", "f.txt"]);
    }

    #[test]
    fn test_delete_rejects_out_of_range() {
        let mut archive = six();
        assert!(!archive.delete(&[0, 2]));
        assert!(!archive.delete(&[2, 7]));
        assert_eq!(archive.len(), 6);
    }

    #[test]
    fn test_delete_empty_and_duplicates() {
        let mut archive = six();
        assert!(archive.delete(&[]));
        assert_eq!(archive.len(), 6);
        assert!(archive.delete(&[3, 3]));
        assert_eq!(archive.len(), 5);
        assert!(!archive.contains("c.txt"));
    }

    #[test]
    fn test_unprotected_accepts_anything() {
        let archive = six();
        assert!(!archive.is_protected());
        assert!(archive.check_password(None));
        assert!(archive.check_password_with(&hasher(), Some("anything")));
        assert!(archive.unlock(None).is_ok());
    }

    #[test]
    fn test_protected() {
        let hasher = hasher();
        let archive = Archive::with_hasher(vec![entry("a.txt")], Some("pw"), &hasher).unwrap();
        assert!(archive.is_protected());
        assert!(archive.check_password_with(&hasher, Some("pw")));
        assert!(!archive.check_password_with(&hasher, Some("wrong")));
        assert!(!archive.check_password_with(&hasher, None));
        assert!(matches!(
            archive.unlock_with(&hasher, Some("wrong")),
            Err(IdoArcError::WrongPassword)
        ));
    }

    #[test]
    fn test_empty_password_protects() {
        let hasher = hasher();
        let archive = Archive::with_hasher(Vec::new(), Some(""), &hasher).unwrap();
        assert!(archive.is_protected());
        assert!(archive.check_password_with(&hasher, Some("")));
        assert!(!archive.check_password_with(&hasher, None));
    }

    #[test]
    fn test_equality_includes_protection() {
        let digest = PasswordDigest::from_bytes([7; crate::password::DIGEST_LEN]);
        let plain = Archive::unprotected(vec![entry("a.txt")]);
        let locked = Archive::from_digest(vec![entry("a.txt")], Some(digest.clone()));
        assert_ne!(plain, locked);
        assert_eq!(locked, Archive::from_digest(vec![entry("a.txt")], Some(digest)));
    }

    #[test]
    fn test_into_entries() {
        let entries = six().into_entries();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].path(), "f.txt");
    }
}
