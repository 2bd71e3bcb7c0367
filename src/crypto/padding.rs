//! PKCS#7 padding for 128-bit blocks

use crate::error::{SealError, SealResult};

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// Pad `plaintext` to the next multiple of [`BLOCK_SIZE`]
///
/// Always appends between 1 and 16 bytes; an aligned message gets a full
/// extra block.
pub fn pad(plaintext: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - plaintext.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(plaintext.len() + pad_len);
    padded.extend_from_slice(plaintext);
    padded.resize(plaintext.len() + pad_len, pad_len as u8);
    padded
}

/// Strip PKCS#7 padding in place
pub fn unpad(buf: &mut Vec<u8>) -> SealResult<()> {
    let pad_len = *buf.last().ok_or(SealError::InvalidPadding)? as usize;

    if pad_len == 0 || pad_len > BLOCK_SIZE || pad_len > buf.len() {
        return Err(SealError::InvalidPadding);
    }

    let start = buf.len() - pad_len;
    if buf[start..].iter().any(|&b| b as usize != pad_len) {
        return Err(SealError::InvalidPadding);
    }

    buf.truncate(start);
    Ok(())
}
