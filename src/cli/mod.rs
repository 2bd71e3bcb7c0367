//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the sealing library.

pub mod encrypt;
pub mod inspect;
pub mod passphrase;

pub use encrypt::{handle_decrypt_command, handle_encrypt_command, DecryptArgs, EncryptArgs};
pub use inspect::{handle_config_command, handle_inspect_command, handle_keygen_command, InspectArgs};
pub use passphrase::PassphraseSource;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{EnvelopeFormat, SealPaths, Settings};
use crate::crypto::Envelope;
use crate::error::{SealError, SealResult};

const TRACING_TARGET: &str = "envseal::cli";

/// Resolved paths, effective settings and the audit sink for one run
pub struct CliContext {
    pub paths: SealPaths,
    pub settings: Settings,
    audit: Option<AuditLogger>,
}

impl CliContext {
    pub fn new(paths: SealPaths, settings: Settings) -> Self {
        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::for_paths(&paths));
        Self {
            paths,
            settings,
            audit,
        }
    }

    /// Whether envelopes are handled as raw bytes for this run
    pub fn binary(&self, flag: bool) -> bool {
        flag || self.settings.envelope_format == EnvelopeFormat::Binary
    }

    /// Append `entry` to the audit log, marked failed if `result` is an error
    ///
    /// An audit write failure is logged and never masks the command's own
    /// result.
    pub fn finish(&self, entry: AuditEntry, result: SealResult<()>) -> SealResult<()> {
        let entry = match &result {
            Ok(()) => entry,
            Err(e) => entry.with_error(e),
        };
        self.record(&entry);
        result
    }

    fn record(&self, entry: &AuditEntry) {
        let Some(logger) = &self.audit else {
            return;
        };

        if let Err(e) = logger.log(entry) {
            tracing::warn!(
                target: TRACING_TARGET,
                path = %logger.path().display(),
                error = %e,
                "failed to write audit entry"
            );
        }
    }
}

/// Parse an envelope read from a file or stdin
///
/// Text envelopes may carry surrounding whitespace, such as the trailing
/// newline written by `envseal encrypt`.
pub(crate) fn parse_envelope(data: &[u8], binary: bool) -> SealResult<Envelope> {
    if binary {
        return Envelope::from_bytes(data);
    }

    let text = std::str::from_utf8(data)
        .map_err(|_| SealError::invalid_envelope("envelope text is not valid UTF-8"))?;
    Envelope::from_base64(text.trim())
}
