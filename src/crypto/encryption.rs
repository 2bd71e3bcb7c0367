//! AES-256-CBC encryption/decryption
//!
//! Provides confidentiality only; integrity comes from the authenticator.
//! Operates on whole blocks: padding is applied and stripped by
//! [`super::padding`], never here.

use aes::Aes256;
use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::{SealError, SealResult};

use super::padding::BLOCK_SIZE;
use super::DerivedKey;

/// Size of the CBC initialization vector in bytes
pub const IV_SIZE: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypt an already padded buffer in place and return it as ciphertext
pub fn encrypt_blocks(
    mut padded: Vec<u8>,
    key: &DerivedKey,
    iv: &[u8; IV_SIZE],
) -> SealResult<Vec<u8>> {
    let len = padded.len();
    if len == 0 || len % BLOCK_SIZE != 0 {
        return Err(SealError::InvalidPadding);
    }

    Aes256CbcEnc::new(key.as_bytes().into(), iv.into())
        .encrypt_padded_mut::<NoPadding>(&mut padded, len)
        .map_err(|_| SealError::InvalidPadding)?;

    Ok(padded)
}

/// Decrypt whole ciphertext blocks, leaving the padding in place
pub fn decrypt_blocks(
    ciphertext: &[u8],
    key: &DerivedKey,
    iv: &[u8; IV_SIZE],
) -> SealResult<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(SealError::invalid_envelope(format!(
            "ciphertext length {} is not a positive multiple of {}",
            ciphertext.len(),
            BLOCK_SIZE
        )));
    }

    let mut buf = ciphertext.to_vec();
    Aes256CbcDec::new(key.as_bytes().into(), iv.into())
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|_| SealError::invalid_envelope("ciphertext is not block aligned"))?;

    Ok(buf)
}
