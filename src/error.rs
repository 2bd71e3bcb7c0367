//! Custom error types for envseal
//!
//! This module defines the error hierarchy for sealing and opening envelopes
//! using thiserror for ergonomic error definitions. No variant ever carries
//! the passphrase, derived keys, or plaintext.

use thiserror::Error;

/// The main error type for envseal operations
#[derive(Error, Debug)]
pub enum SealError {
    /// Work factor outside the accepted range, at seal or open time
    #[error("Iterations out of range: {iterations} (expected 50..=100000)")]
    IterationsOutOfRange { iterations: u32 },

    /// Envelope is too short, misaligned, or not valid URL-safe Base64
    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(String),

    /// Authentication tag mismatch (tampering or wrong passphrase)
    #[error("Message tampered: authentication tag does not match")]
    MessageTampered,

    /// Padding check failed after decryption
    #[error("Invalid padding")]
    InvalidPadding,

    /// The OS random source failed to deliver bytes
    #[error("Entropy unavailable: {0}")]
    EntropyUnavailable(String),

    /// bcrypt-pbkdf cannot derive from an empty passphrase
    #[error("Passphrase must not be empty")]
    EmptyPassphrase,

    /// Key derivation failed for any other reason
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// Decrypted plaintext was requested as text but is not UTF-8
    #[error("Decrypted data is not valid UTF-8")]
    InvalidUtf8,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl SealError {
    /// Create an "invalid envelope" error
    pub fn invalid_envelope(reason: impl Into<String>) -> Self {
        Self::InvalidEnvelope(reason.into())
    }

    /// Check if this is a tag mismatch
    pub fn is_tampered(&self) -> bool {
        matches!(self, Self::MessageTampered)
    }

    /// Check if this is a malformed envelope
    pub fn is_invalid_envelope(&self) -> bool {
        matches!(self, Self::InvalidEnvelope(_))
    }

    /// Short machine-readable name of the error kind, used in audit entries
    pub fn kind(&self) -> &'static str {
        match self {
            Self::IterationsOutOfRange { .. } => "iterations_out_of_range",
            Self::InvalidEnvelope(_) => "invalid_envelope",
            Self::MessageTampered => "message_tampered",
            Self::InvalidPadding => "invalid_padding",
            Self::EntropyUnavailable(_) => "entropy_unavailable",
            Self::EmptyPassphrase => "empty_passphrase",
            Self::KeyDerivation(_) => "key_derivation",
            Self::InvalidUtf8 => "invalid_utf8",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
        }
    }
}

impl From<std::io::Error> for SealError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SealError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for envseal operations
pub type SealResult<T> = Result<T, SealError>;
