//! Password protection for archives.
//!
//! An archive is either unprotected or carries a [`PasswordDigest`]: a random
//! salt followed by the Argon2id hash of the password under that salt. The
//! digest has a fixed width so it fits the container's password slot.
//!
//! Hashing sits behind the [`PasswordHasher`] trait so the cost parameters
//! can be tuned (and lowered in tests) without touching the archive.

use argon2::{Algorithm, Argon2, Params, Version};
use idoarc_core::{IdoArcError, Result};
use rand::RngCore;
use rand::rngs::OsRng;
use std::fmt;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Hash output length in bytes.
pub const HASH_LEN: usize = 32;

/// Total digest length: salt followed by hash.
pub const DIGEST_LEN: usize = SALT_LEN + HASH_LEN;

/// Salted password hash stored in a protected archive.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest([u8; DIGEST_LEN]);

impl PasswordDigest {
    /// Build a digest from a salt and a hash.
    pub fn new(salt: [u8; SALT_LEN], hash: [u8; HASH_LEN]) -> Self {
        let mut bytes = [0u8; DIGEST_LEN];
        bytes[..SALT_LEN].copy_from_slice(&salt);
        bytes[SALT_LEN..].copy_from_slice(&hash);
        Self(bytes)
    }

    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Read a digest from a slice of exactly [`DIGEST_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; DIGEST_LEN] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Salt portion.
    pub fn salt(&self) -> &[u8] {
        &self.0[..SALT_LEN]
    }

    /// Hash portion.
    pub fn hash(&self) -> &[u8] {
        &self.0[SALT_LEN..]
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("salt", &hex::encode(self.salt()))
            .finish_non_exhaustive()
    }
}

/// Whether an archive is password protected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Protection {
    /// Anyone may read the archive.
    #[default]
    Unprotected,
    /// Reading requires a password matching the digest.
    Protected(PasswordDigest),
}

impl Protection {
    /// Returns true if a password is required.
    pub fn is_protected(&self) -> bool {
        matches!(self, Protection::Protected(_))
    }

    /// The stored digest, if any.
    pub fn digest(&self) -> Option<&PasswordDigest> {
        match self {
            Protection::Unprotected => None,
            Protection::Protected(digest) => Some(digest),
        }
    }
}

impl From<Option<PasswordDigest>> for Protection {
    fn from(digest: Option<PasswordDigest>) -> Self {
        match digest {
            Some(digest) => Protection::Protected(digest),
            None => Protection::Unprotected,
        }
    }
}

/// Salted one-way password hashing.
pub trait PasswordHasher {
    /// Hash a password under a freshly generated salt.
    fn hash(&self, password: &str) -> Result<PasswordDigest>;

    /// Check a candidate password against a stored digest.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool;
}

/// Memory cost in KiB used for archives written by `idoarc`.
///
/// Containers do not record cost parameters, so these values are part of
/// the format: changing them makes existing protected archives unreadable.
pub const DEFAULT_M_COST: u32 = 19 * 1024;

/// Number of passes used for archives written by `idoarc`.
pub const DEFAULT_T_COST: u32 = 2;

/// Degree of parallelism used for archives written by `idoarc`.
pub const DEFAULT_P_COST: u32 = 1;

/// Argon2id password hasher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argon2Hasher {
    m_cost: u32,
    t_cost: u32,
    p_cost: u32,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            m_cost: DEFAULT_M_COST,
            t_cost: DEFAULT_T_COST,
            p_cost: DEFAULT_P_COST,
        }
    }
}

impl Argon2Hasher {
    /// Create a hasher with explicit cost parameters.
    ///
    /// `m_cost` is the memory size in KiB, `t_cost` the number of passes,
    /// and `p_cost` the degree of parallelism.
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self> {
        let hasher = Self {
            m_cost,
            t_cost,
            p_cost,
        };
        hasher.params()?;
        Ok(hasher)
    }

    /// Cost parameters as `(m_cost, t_cost, p_cost)`.
    pub fn costs(&self) -> (u32, u32, u32) {
        (self.m_cost, self.t_cost, self.p_cost)
    }

    fn params(&self) -> Result<Params> {
        Params::new(self.m_cost, self.t_cost, self.p_cost, Some(HASH_LEN))
            .map_err(|e| IdoArcError::password(e.to_string()))
    }

    fn derive(&self, password: &str, salt: &[u8]) -> Result<[u8; HASH_LEN]> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params()?);
        let mut hash = [0u8; HASH_LEN];
        argon2
            .hash_password_into(password.as_bytes(), salt, &mut hash)
            .map_err(|e| IdoArcError::password(e.to_string()))?;
        Ok(hash)
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let hash = self.derive(password, &salt)?;
        Ok(PasswordDigest::new(salt, hash))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool {
        match self.derive(password, digest.salt()) {
            Ok(hash) => constant_time_eq(&hash, digest.hash()),
            Err(e) => {
                log::warn!("password verification failed to hash candidate: {}", e);
                false
            }
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::with_params(8, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let digest = hasher.hash("pw").unwrap();
        assert!(hasher.verify("pw", &digest));
        assert!(!hasher.verify("wrong", &digest));
        assert!(!hasher.verify("", &digest));
    }

    #[test]
    fn test_salt_is_random() {
        let hasher = hasher();
        let a = hasher.hash("pw").unwrap();
        let b = hasher.hash("pw").unwrap();
        assert_ne!(a.salt(), b.salt());
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_password_is_hashed() {
        let hasher = hasher();
        let digest = hasher.hash("").unwrap();
        assert!(hasher.verify("", &digest));
        assert!(!hasher.verify(" ", &digest));
    }

    #[test]
    fn test_digest_layout() {
        let digest = PasswordDigest::new([1; SALT_LEN], [2; HASH_LEN]);
        assert_eq!(digest.as_bytes().len(), DIGEST_LEN);
        assert!(digest.salt().iter().all(|&b| b == 1));
        assert!(digest.hash().iter().all(|&b| b == 2));
        assert_eq!(PasswordDigest::from_slice(digest.as_bytes()), Some(digest));
        assert!(PasswordDigest::from_slice(&[0; 10]).is_none());
    }

    #[test]
    fn test_default_costs_are_fixed() {
        let hasher = Argon2Hasher::default();
        assert_eq!(hasher.costs(), (19456, 2, 1));
        assert_eq!(
            Argon2Hasher::with_params(DEFAULT_M_COST, DEFAULT_T_COST, DEFAULT_P_COST).unwrap(),
            hasher
        );
    }

    #[test]
    fn test_digest_debug_shows_salt_only() {
        let digest = PasswordDigest::new([0xab; SALT_LEN], [0xcd; HASH_LEN]);
        let shown = format!("{:?}", digest);
        assert!(shown.contains(&"ab".repeat(SALT_LEN)));
        assert!(!shown.contains("cd"));
    }

    #[test]
    fn test_invalid_params() {
        assert!(Argon2Hasher::with_params(0, 0, 0).is_err());
    }

    #[test]
    fn test_protection() {
        assert!(!Protection::Unprotected.is_protected());
        let digest = PasswordDigest::from_bytes([9; DIGEST_LEN]);
        let protection = Protection::from(Some(digest.clone()));
        assert!(protection.is_protected());
        assert_eq!(protection.digest(), Some(&digest));
        assert_eq!(Protection::from(None), Protection::Unprotected);
    }
}
