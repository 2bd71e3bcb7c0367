//! envseal - passphrase-based authenticated encryption envelopes
//!
//! This library seals arbitrary byte strings under a passphrase into a
//! self-describing envelope, and opens such envelopes again. Keys are
//! stretched with bcrypt-pbkdf, payloads are encrypted with AES-256-CBC and
//! authenticated with HMAC-SHA-512 (encrypt-then-MAC).
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: Primitives and the binary envelope format
//! - `seal`: The public encrypt/decrypt operations
//! - `error`: Custom error types
//! - `config`: Configuration and path management for the CLI
//! - `storage`: File and stdin/stdout I/O
//! - `audit`: Audit logging system
//! - `cli`: Command handlers for the `envseal` binary
//! - `telemetry`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! let envelope = envseal::encrypt("hello", "correct horse")?;
//! let plaintext = envseal::decrypt(&envelope, "correct horse")?;
//! assert_eq!(plaintext, b"hello");
//! # Ok::<(), envseal::SealError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod seal;
pub mod storage;
pub mod telemetry;

pub use crypto::{Envelope, EnvelopeSummary, Iterations, SecureString};
pub use error::{SealError, SealResult};
pub use seal::{
    decrypt, decrypt_bytes, decrypt_string, encrypt, encrypt_bytes, generate_key, open, Sealer,
};
