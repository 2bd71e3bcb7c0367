//! Key derivation using bcrypt-pbkdf
//!
//! Derives 256-bit keys from user passphrases with the OpenBSD bcrypt PBKDF,
//! which uses bcrypt's expensive key setup as its work function. The same
//! construction is used for both the encryption key (salt) and the
//! authentication key (pepper).

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{SealError, SealResult};

const TRACING_TARGET: &str = "envseal::kdf";

/// Size of a derived key in bytes (AES-256 / HMAC key)
pub const KEY_SIZE: usize = 32;

/// Size of the salt and pepper in bytes
pub const SALT_SIZE: usize = 16;

/// Work factor for the KDF
///
/// Always within `MIN..=MAX`; constructing one outside that range fails
/// with [`SealError::IterationsOutOfRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Iterations(u32);

impl Iterations {
    /// Smallest accepted work factor
    pub const MIN: u32 = 50;
    /// Largest accepted work factor
    pub const MAX: u32 = 100_000;
    /// Work factor used by the top-level `encrypt` entry points
    pub const DEFAULT: Iterations = Iterations(Self::MIN);

    /// Validate a raw iteration count
    pub fn new(iterations: u32) -> SealResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&iterations) {
            Ok(Self(iterations))
        } else {
            Err(SealError::IterationsOutOfRange { iterations })
        }
    }

    /// Get the raw iteration count
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Iterations {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for Iterations {
    type Error = SealError;

    fn try_from(value: u32) -> SealResult<Self> {
        Self::new(value)
    }
}

impl From<Iterations> for u32 {
    fn from(value: Iterations) -> Self {
        value.0
    }
}

impl fmt::Display for Iterations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A derived key, zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The 32-byte key
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive a key from passphrase bytes and a 16-byte salt or pepper
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8; SALT_SIZE],
    iterations: Iterations,
) -> SealResult<DerivedKey> {
    if passphrase.is_empty() {
        return Err(SealError::EmptyPassphrase);
    }

    tracing::debug!(target: TRACING_TARGET, iterations = iterations.get(), "deriving key");

    let mut key = DerivedKey {
        key: [0u8; KEY_SIZE],
    };
    bcrypt_pbkdf::bcrypt_pbkdf(passphrase, salt, iterations.get(), &mut key.key)
        .map_err(|e| SealError::KeyDerivation(e.to_string()))?;

    Ok(key)
}
