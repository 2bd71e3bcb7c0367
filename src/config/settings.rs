//! User settings for envseal
//!
//! Manages command-line defaults: envelope format, KDF work factor for new
//! envelopes, and whether operations are written to the audit log.

use serde::{Deserialize, Serialize};

use super::paths::SealPaths;
use crate::crypto::Iterations;
use crate::error::SealError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Envelope representation read and written by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeFormat {
    /// URL-safe Base64 text (default)
    #[default]
    Text,
    /// Raw binary envelope
    Binary,
}

/// User settings for envseal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default envelope format
    #[serde(default)]
    pub envelope_format: EnvelopeFormat,

    /// KDF work factor used by `envseal encrypt` (validated on load)
    #[serde(default)]
    pub iterations: Iterations,

    /// Whether encrypt/decrypt/keygen runs are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            envelope_format: EnvelopeFormat::default(),
            iterations: Iterations::default(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &SealPaths) -> Result<Self, SealError> {
        read_json(paths.settings_file()).map_err(|e| match e {
            SealError::Json(msg) => {
                SealError::Config(format!("Failed to parse settings file: {}", msg))
            }
            other => other,
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SealPaths) -> Result<(), SealError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
