//! Audit entry data structures
//!
//! One entry per command-line run. Entries describe what happened (operation,
//! where bytes came from and went, sizes, outcome) and never contain the
//! passphrase, keys, or payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SealError;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A message was sealed into an envelope
    Encrypt,
    /// An envelope was opened
    Decrypt,
    /// A random passphrase was generated
    Keygen,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Encrypt => write!(f, "ENCRYPT"),
            Operation::Decrypt => write!(f, "DECRYPT"),
            Operation::Keygen => write!(f, "KEYGEN"),
        }
    }
}

/// Result of an audited operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Input location (`-` for stdin)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// Output location (`-` for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Bytes read
    pub input_bytes: usize,

    /// Bytes written
    pub output_bytes: usize,

    /// KDF work factor, when one was involved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,

    /// Whether the operation succeeded
    pub outcome: Outcome,

    /// Error kind on failure (e.g. `message_tampered`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    /// Create a new entry for a successful operation
    pub fn success(operation: Operation, input_bytes: usize, output_bytes: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            input: None,
            output: None,
            input_bytes,
            output_bytes,
            iterations: None,
            outcome: Outcome::Success,
            error: None,
        }
    }

    /// Mark the operation as failed; nothing counts as written
    pub fn with_error(mut self, error: &SealError) -> Self {
        self.outcome = Outcome::Failure;
        self.error = Some(error.kind().to_string());
        self.output_bytes = 0;
        self
    }

    /// Record the input and output locations
    pub fn with_locations(mut self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self.output = Some(output.into());
        self
    }

    /// Record the KDF work factor
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Check if the operation succeeded
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Format as a human-readable line
    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "[{}] {} {} -> {} ({} -> {} bytes)",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.input.as_deref().unwrap_or("-"),
            self.output.as_deref().unwrap_or("-"),
            self.input_bytes,
            self.output_bytes,
        );

        if let Some(ref error) = self.error {
            line.push_str(&format!(" FAILED: {}", error));
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_entry() {
        let entry = AuditEntry::success(Operation::Encrypt, 5, 200)
            .with_locations("msg.txt", "msg.seal")
            .with_iterations(50);

        assert!(entry.is_success());
        assert_eq!(entry.iterations, Some(50));
        assert!(entry.error.is_none());
    }

    #[test]
    fn test_failure_entry() {
        let entry = AuditEntry::success(Operation::Decrypt, 200, 31)
            .with_error(&SealError::MessageTampered);

        assert!(!entry.is_success());
        assert_eq!(entry.output_bytes, 0);
        assert_eq!(entry.error.as_deref(), Some("message_tampered"));
    }

    #[test]
    fn test_with_error_keeps_context() {
        let entry = AuditEntry::success(Operation::Encrypt, 12, 172)
            .with_locations("a.txt", "a.seal")
            .with_iterations(64)
            .with_error(&SealError::EmptyPassphrase);

        assert!(!entry.is_success());
        assert_eq!(entry.input_bytes, 12);
        assert_eq!(entry.output_bytes, 0);
        assert_eq!(entry.iterations, Some(64));
        assert_eq!(entry.input.as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::success(Operation::Keygen, 0, 64);
        let json = serde_json::to_string(&entry).unwrap();

        assert!(json.contains("\"operation\":\"keygen\""));
        assert!(json.contains("\"outcome\":\"success\""));
        assert!(!json.contains("error"));
        assert!(!json.contains("iterations"));
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::success(Operation::Decrypt, 10, 0)
            .with_error(&SealError::InvalidPadding)
            .with_locations("in.seal", "-");
        let line = entry.format_human_readable();

        assert!(line.contains("DECRYPT"));
        assert!(line.contains("in.seal -> -"));
        assert!(line.contains("FAILED: invalid_padding"));
    }
}
