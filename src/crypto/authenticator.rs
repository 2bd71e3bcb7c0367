//! HMAC-SHA-512 authentication over the ciphertext
//!
//! Encrypt-then-MAC: the tag covers the ciphertext only. The envelope header
//! (IV, salt, pepper, iterations) is not part of the MAC input.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::error::{SealError, SealResult};

use super::DerivedKey;

/// Size of the HMAC-SHA-512 tag in bytes
pub const TAG_SIZE: usize = 64;

type HmacSha512 = Hmac<Sha512>;

/// Compute the tag for `ciphertext` under the authentication key
pub fn compute_tag(key: &DerivedKey, ciphertext: &[u8]) -> SealResult<[u8; TAG_SIZE]> {
    let mut mac = <HmacSha512 as Mac>::new_from_slice(key.as_bytes())
        .map_err(|e| SealError::KeyDerivation(format!("Invalid HMAC key: {}", e)))?;
    mac.update(ciphertext);

    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}

/// Recompute the tag and compare it against `expected` in constant time
pub fn verify_tag(key: &DerivedKey, ciphertext: &[u8], expected: &[u8; TAG_SIZE]) -> SealResult<()> {
    let computed = compute_tag(key, ciphertext)?;

    if tags_match(&computed, expected) {
        Ok(())
    } else {
        Err(SealError::MessageTampered)
    }
}

/// Constant-time equality; examines every byte regardless of where a
/// difference occurs. Slices of different length never match.
pub fn tags_match(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
