//! Envelope codec
//!
//! Binary layout (octet offsets):
//!
//! ```text
//!   0..64   tag         HMAC-SHA-512 over the ciphertext
//!  64..80   iv          AES-256-CBC initialization vector
//!  80..96   salt        KDF salt for the encryption key
//!  96..112  pepper      KDF salt for the authentication key
//! 112..116  iterations  big-endian u32
//! 116..     ciphertext  one or more 16-byte blocks
//! ```
//!
//! The text form is the URL-safe Base64 encoding (with `=` padding) of the
//! binary form. There is no version field.

use base64::{engine::general_purpose::URL_SAFE, Engine};
use serde::Serialize;

use crate::error::{SealError, SealResult};

use super::authenticator::TAG_SIZE;
use super::encryption::IV_SIZE;
use super::key_derivation::{Iterations, SALT_SIZE};
use super::padding::BLOCK_SIZE;

/// Size of the pepper in bytes
pub const PEPPER_SIZE: usize = SALT_SIZE;

/// Size of the encoded iteration count in bytes
pub const ITERATIONS_SIZE: usize = 4;

/// Length of the fixed header preceding the ciphertext
pub const HEADER_SIZE: usize = TAG_SIZE + IV_SIZE + SALT_SIZE + PEPPER_SIZE + ITERATIONS_SIZE;

/// Smallest well-formed envelope: header plus one ciphertext block
pub const MIN_ENVELOPE_SIZE: usize = HEADER_SIZE + BLOCK_SIZE;

const IV_OFFSET: usize = TAG_SIZE;
const SALT_OFFSET: usize = IV_OFFSET + IV_SIZE;
const PEPPER_OFFSET: usize = SALT_OFFSET + SALT_SIZE;
const ITERATIONS_OFFSET: usize = PEPPER_OFFSET + PEPPER_SIZE;

/// A parsed envelope
///
/// Owns copies of every field; never references the passphrase or keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub tag: [u8; TAG_SIZE],
    pub iv: [u8; IV_SIZE],
    pub salt: [u8; SALT_SIZE],
    pub pepper: [u8; PEPPER_SIZE],
    pub iterations: Iterations,
    pub ciphertext: Vec<u8>,
}

/// Non-secret description of an envelope, for display
#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeSummary {
    pub iterations: u32,
    pub envelope_len: usize,
    pub ciphertext_len: usize,
    /// Upper bound on the plaintext length (ciphertext minus one pad byte)
    pub max_plaintext_len: usize,
    pub tag: String,
    pub iv: String,
    pub salt: String,
    pub pepper: String,
}

impl Envelope {
    /// Total length of the binary form
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.ciphertext.len()
    }

    /// Lay out the binary form
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.pepper);
        out.extend_from_slice(&self.iterations.get().to_be_bytes());
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// URL-safe Base64 text form
    pub fn to_base64(&self) -> String {
        URL_SAFE.encode(self.to_bytes())
    }

    /// Parse the binary form
    ///
    /// Checks the length and the iteration range. Does not authenticate
    /// anything; the header fields are never covered by the tag.
    pub fn from_bytes(data: &[u8]) -> SealResult<Self> {
        if data.len() < MIN_ENVELOPE_SIZE {
            return Err(SealError::invalid_envelope(format!(
                "expected at least {} bytes, got {}",
                MIN_ENVELOPE_SIZE,
                data.len()
            )));
        }

        let iterations = u32::from_be_bytes(field(data, ITERATIONS_OFFSET)?);

        Ok(Self {
            tag: field(data, 0)?,
            iv: field(data, IV_OFFSET)?,
            salt: field(data, SALT_OFFSET)?,
            pepper: field(data, PEPPER_OFFSET)?,
            iterations: Iterations::new(iterations)?,
            ciphertext: data[HEADER_SIZE..].to_vec(),
        })
    }

    /// Parse the URL-safe Base64 text form
    ///
    /// Decoding is strict: only the URL-safe alphabet, canonical `=` padding.
    pub fn from_base64(text: &str) -> SealResult<Self> {
        let data = URL_SAFE
            .decode(text)
            .map_err(|e| SealError::invalid_envelope(format!("bad base64: {}", e)))?;
        Self::from_bytes(&data)
    }

    /// Describe the envelope without touching any secret
    pub fn summary(&self) -> EnvelopeSummary {
        EnvelopeSummary {
            iterations: self.iterations.get(),
            envelope_len: self.encoded_len(),
            ciphertext_len: self.ciphertext.len(),
            max_plaintext_len: self.ciphertext.len().saturating_sub(1),
            tag: hex::encode(self.tag),
            iv: hex::encode(self.iv),
            salt: hex::encode(self.salt),
            pepper: hex::encode(self.pepper),
        }
    }
}

/// Expected binary envelope length for a plaintext of `plaintext_len` bytes
pub fn envelope_len(plaintext_len: usize) -> usize {
    HEADER_SIZE + BLOCK_SIZE * (plaintext_len / BLOCK_SIZE + 1)
}

fn field<const N: usize>(data: &[u8], offset: usize) -> SealResult<[u8; N]> {
    data.get(offset..offset + N)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| SealError::invalid_envelope("truncated header"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Envelope {
        Envelope {
            tag: [0xA1; TAG_SIZE],
            iv: [0xB2; IV_SIZE],
            salt: [0xC3; SALT_SIZE],
            pepper: [0xD4; PEPPER_SIZE],
            iterations: Iterations::new(1234).unwrap(),
            ciphertext: vec![0xE5; 32],
        }
    }

    #[test]
    fn test_header_constants() {
        assert_eq!(HEADER_SIZE, 116);
        assert_eq!(MIN_ENVELOPE_SIZE, 132);
    }

    #[test]
    fn test_binary_layout() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes.len(), 148);
        assert!(bytes[0..64].iter().all(|&b| b == 0xA1));
        assert!(bytes[64..80].iter().all(|&b| b == 0xB2));
        assert!(bytes[80..96].iter().all(|&b| b == 0xC3));
        assert!(bytes[96..112].iter().all(|&b| b == 0xD4));
        assert_eq!(&bytes[112..116], &[0x00, 0x00, 0x04, 0xD2]);
        assert!(bytes[116..].iter().all(|&b| b == 0xE5));
    }

    #[test]
    fn test_parse_binary() {
        let envelope = sample();
        let parsed = Envelope::from_bytes(&envelope.to_bytes()).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn test_text_form_is_url_safe() {
        let mut envelope = sample();
        envelope.tag = [0xFB; TAG_SIZE];
        let text = envelope.to_base64();
        assert!(text.contains('-') || text.contains('_'));
        assert!(!text.contains('+') && !text.contains('/'));
        assert_eq!(Envelope::from_base64(&text).unwrap(), envelope);
    }

    #[test]
    fn test_too_short() {
        let bytes = sample().to_bytes();
        let result = Envelope::from_bytes(&bytes[..MIN_ENVELOPE_SIZE - 1]);
        assert!(matches!(result, Err(SealError::InvalidEnvelope(_))));
        assert!(Envelope::from_bytes(&[]).is_err());
    }

    #[test]
    fn test_iterations_out_of_range() {
        let mut bytes = sample().to_bytes();
        bytes[112..116].copy_from_slice(&[0x00, 0x00, 0x00, 0x30]);
        assert!(matches!(
            Envelope::from_bytes(&bytes),
            Err(SealError::IterationsOutOfRange { iterations: 48 })
        ));

        bytes[112..116].copy_from_slice(&100_001u32.to_be_bytes());
        assert!(matches!(
            Envelope::from_bytes(&bytes),
            Err(SealError::IterationsOutOfRange { iterations: 100_001 })
        ));
    }

    #[test]
    fn test_iterations_at_bounds_accepted() {
        let mut bytes = sample().to_bytes();
        bytes[112..116].copy_from_slice(&100_000u32.to_be_bytes());
        assert_eq!(Envelope::from_bytes(&bytes).unwrap().iterations.get(), 100_000);

        bytes[112..116].copy_from_slice(&50u32.to_be_bytes());
        assert_eq!(Envelope::from_bytes(&bytes).unwrap().iterations.get(), 50);
    }

    #[test]
    fn test_rejects_standard_alphabet() {
        let mut envelope = sample();
        envelope.tag = [0xFB; TAG_SIZE];
        let text = envelope.to_base64().replace('-', "+").replace('_', "/");
        assert!(text.contains('+'));
        let result = Envelope::from_base64(&text);
        assert!(matches!(result, Err(SealError::InvalidEnvelope(_))));
    }

    #[test]
    fn test_rejects_missing_padding() {
        // 148 bytes encode to 200 chars with two '=' at the end
        let text = sample().to_base64();
        assert!(text.ends_with("=="));
        let result = Envelope::from_base64(text.trim_end_matches('='));
        assert!(matches!(result, Err(SealError::InvalidEnvelope(_))));
    }

    #[test]
    fn test_rejects_invalid_character() {
        let mut text = sample().to_base64();
        text.replace_range(10..11, "*");
        assert!(matches!(
            Envelope::from_base64(&text),
            Err(SealError::InvalidEnvelope(_))
        ));
    }

    #[test]
    fn test_envelope_len_law() {
        assert_eq!(envelope_len(0), 132);
        assert_eq!(envelope_len(15), 132);
        assert_eq!(envelope_len(16), 148);
        assert_eq!(envelope_len(17), 148);
    }

    #[test]
    fn test_summary_has_no_ciphertext() {
        let summary = sample().summary();
        assert_eq!(summary.iterations, 1234);
        assert_eq!(summary.envelope_len, 148);
        assert_eq!(summary.ciphertext_len, 32);
        assert_eq!(summary.iv, "b2".repeat(16));
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains(&"e5".repeat(4)));
    }
}
