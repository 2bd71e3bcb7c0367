//! Seal and open pipelines
//!
//! Sealing draws a fresh IV, salt, and pepper, derives an encryption key from
//! the salt and an authentication key from the pepper, then pads, encrypts,
//! and tags the ciphertext. Opening runs the same steps in reverse and checks
//! the tag, in constant time, before decrypting anything.
//!
//! Nothing is carried between calls. The free functions build a fresh
//! [`Sealer`] over the OS entropy source and the default work factor.

use rand::rngs::OsRng;
use zeroize::Zeroize;

use crate::crypto::{
    compute_tag, decrypt_blocks, derive_key, encrypt_blocks, pad, unpad, verify_tag,
    DerivedKey, Envelope, Iterations, RandomSource, KEY_SIZE,
};
use crate::error::{SealError, SealResult};

const TRACING_TARGET: &str = "envseal::seal";

/// Encryption and authentication keys for one envelope
struct KeyPair {
    encryption: DerivedKey,
    authentication: DerivedKey,
}

impl KeyPair {
    fn derive(
        passphrase: &str,
        salt: &[u8; 16],
        pepper: &[u8; 16],
        iterations: Iterations,
    ) -> SealResult<Self> {
        let passphrase = passphrase.as_bytes();
        Ok(Self {
            encryption: derive_key(passphrase, salt, iterations)?,
            authentication: derive_key(passphrase, pepper, iterations)?,
        })
    }
}

/// Builds envelopes with an injectable random source and work factor
#[derive(Debug, Clone)]
pub struct Sealer<R = OsRng> {
    rng: R,
    iterations: Iterations,
}

impl Sealer<OsRng> {
    /// Sealer over OS entropy with the default work factor (50)
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for Sealer<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Sealer<R> {
    /// Sealer drawing salts and IVs from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            iterations: Iterations::DEFAULT,
        }
    }

    /// Use a different KDF work factor for envelopes sealed from now on
    pub fn iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = iterations;
        self
    }

    /// Current work factor
    pub fn work_factor(&self) -> Iterations {
        self.iterations
    }

    /// Seal `message` (text or bytes) under `passphrase`
    pub fn seal(&mut self, message: impl AsRef<[u8]>, passphrase: &str) -> SealResult<Envelope> {
        let message = message.as_ref();

        let iv: [u8; 16] = self.rng.random_array()?;
        let salt: [u8; 16] = self.rng.random_array()?;
        let pepper: [u8; 16] = self.rng.random_array()?;

        let keys = KeyPair::derive(passphrase, &salt, &pepper, self.iterations)?;

        let ciphertext = encrypt_blocks(pad(message), &keys.encryption, &iv)?;
        let tag = compute_tag(&keys.authentication, &ciphertext)?;

        tracing::debug!(
            target: TRACING_TARGET,
            plaintext_len = message.len(),
            ciphertext_len = ciphertext.len(),
            iterations = self.iterations.get(),
            "sealed envelope"
        );

        Ok(Envelope {
            tag,
            iv,
            salt,
            pepper,
            iterations: self.iterations,
            ciphertext,
        })
    }

    /// Seal and return the binary envelope
    pub fn seal_to_bytes(
        &mut self,
        message: impl AsRef<[u8]>,
        passphrase: &str,
    ) -> SealResult<Vec<u8>> {
        Ok(self.seal(message, passphrase)?.to_bytes())
    }

    /// Seal and return the URL-safe Base64 envelope
    pub fn seal_to_base64(
        &mut self,
        message: impl AsRef<[u8]>,
        passphrase: &str,
    ) -> SealResult<String> {
        Ok(self.seal(message, passphrase)?.to_base64())
    }
}

/// Verify and decrypt a parsed envelope
///
/// Any legal work factor (50..=100000) is accepted; the iteration range was
/// already enforced when the envelope was parsed.
pub fn open(envelope: &Envelope, passphrase: &str) -> SealResult<Vec<u8>> {
    let keys = KeyPair::derive(
        passphrase,
        &envelope.salt,
        &envelope.pepper,
        envelope.iterations,
    )?;

    if let Err(e) = verify_tag(&keys.authentication, &envelope.ciphertext, &envelope.tag) {
        tracing::debug!(target: TRACING_TARGET, "tag verification failed");
        return Err(e);
    }

    let mut plaintext = decrypt_blocks(&envelope.ciphertext, &keys.encryption, &envelope.iv)?;
    if let Err(e) = unpad(&mut plaintext) {
        plaintext.zeroize();
        return Err(e);
    }

    tracing::debug!(
        target: TRACING_TARGET,
        plaintext_len = plaintext.len(),
        iterations = envelope.iterations.get(),
        "opened envelope"
    );

    Ok(plaintext)
}

/// Encrypt `message` into a URL-safe Base64 envelope (50 iterations)
pub fn encrypt(message: impl AsRef<[u8]>, passphrase: &str) -> SealResult<String> {
    Sealer::new().seal_to_base64(message, passphrase)
}

/// Encrypt `message` into a binary envelope (50 iterations)
pub fn encrypt_bytes(message: impl AsRef<[u8]>, passphrase: &str) -> SealResult<Vec<u8>> {
    Sealer::new().seal_to_bytes(message, passphrase)
}

/// Decrypt a URL-safe Base64 envelope
pub fn decrypt(envelope_text: &str, passphrase: &str) -> SealResult<Vec<u8>> {
    open(&Envelope::from_base64(envelope_text)?, passphrase)
}

/// Decrypt a binary envelope
pub fn decrypt_bytes(envelope: &[u8], passphrase: &str) -> SealResult<Vec<u8>> {
    open(&Envelope::from_bytes(envelope)?, passphrase)
}

/// Decrypt a URL-safe Base64 envelope whose payload is UTF-8 text
pub fn decrypt_string(envelope_text: &str, passphrase: &str) -> SealResult<String> {
    let plaintext = decrypt(envelope_text, passphrase)?;
    String::from_utf8(plaintext).map_err(|e| {
        let mut bytes = e.into_bytes();
        bytes.zeroize();
        SealError::InvalidUtf8
    })
}

/// Fresh 32-byte random value as 64 lowercase hex characters
///
/// Meant as a strong passphrase; it is not consumed specially anywhere.
pub fn generate_key() -> SealResult<String> {
    let mut key: [u8; KEY_SIZE] = OsRng.random_array()?;
    let encoded = hex::encode(key);
    key.zeroize();
    Ok(encoded)
}
