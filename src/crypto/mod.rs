//! Cryptographic building blocks for envseal
//!
//! bcrypt-pbkdf key derivation, AES-256-CBC with PKCS#7 padding,
//! HMAC-SHA-512 Encrypt-then-MAC, and the envelope codec that frames them.

pub mod authenticator;
pub mod encryption;
pub mod envelope;
pub mod key_derivation;
pub mod padding;
pub mod random;
pub mod secure_memory;

pub use authenticator::{compute_tag, tags_match, verify_tag, TAG_SIZE};
pub use encryption::{decrypt_blocks, encrypt_blocks, IV_SIZE};
pub use envelope::{envelope_len, Envelope, EnvelopeSummary, HEADER_SIZE, MIN_ENVELOPE_SIZE};
pub use key_derivation::{derive_key, DerivedKey, Iterations, KEY_SIZE, SALT_SIZE};
pub use padding::{pad, unpad, BLOCK_SIZE};
pub use random::RandomSource;
pub use secure_memory::SecureString;
