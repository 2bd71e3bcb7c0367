//! Audit logging system for envseal
//!
//! Records every encrypt, decrypt, and keygen run of the command-line tool
//! in an append-only, line-delimited JSON log.
//!
//! - `AuditEntry`: one run, with timestamp, operation, locations, byte
//!   counts, and outcome. Never holds secrets or payload bytes.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use envseal::audit::{AuditEntry, AuditLogger, Operation};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::success(Operation::Encrypt, plaintext.len(), envelope.len())
//!     .with_locations("notes.txt", "notes.seal");
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation, Outcome};
pub use logger::AuditLogger;
