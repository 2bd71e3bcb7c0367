//! Append-only JSONL audit log
//!
//! One `AuditEntry` per line. The parent directory is created on first write.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::SealPaths;
use crate::error::{SealError, SealResult};

use super::entry::AuditEntry;

/// Writes and reads back the audit log
#[derive(Debug, Clone)]
pub struct AuditLogger {
    path: PathBuf,
}

impl AuditLogger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Logger for the audit log under the resolved config directory
    pub fn for_paths(paths: &SealPaths) -> Self {
        Self::new(paths.audit_log())
    }

    /// Append one entry as a single line and flush it
    pub fn log(&self, entry: &AuditEntry) -> SealResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| SealError::Io(format!("Failed to create {}: {}", dir.display(), e)))?;
        }

        let mut line = serde_json::to_vec(entry)
            .map_err(|e| SealError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        line.push(b'\n');

        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| SealError::Io(format!("Failed to open audit log: {}", e)))?;
        log.write_all(&line)
            .and_then(|()| log.flush())
            .map_err(|e| SealError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Every entry in the log, oldest first; a missing log is empty
    pub fn read_all(&self) -> SealResult<Vec<AuditEntry>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SealError::Io(format!("Failed to read audit log: {}", e))),
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|e| {
                    SealError::Json(format!("Bad audit entry on line {}: {}", idx + 1, e))
                })
            })
            .collect()
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> SealResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(count);
        entries.drain(..skip);
        Ok(entries)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
