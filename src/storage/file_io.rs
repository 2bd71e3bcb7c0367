//! File I/O utilities with atomic writes
//!
//! Envelopes and plaintexts are written to a temp file and renamed into
//! place, so a failed run never leaves a half-written output behind.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::{SealError, SealResult};

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> SealResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| SealError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| SealError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> SealResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let contents = serde_json::to_vec_pretty(data)
        .map_err(|e| SealError::Json(format!("Failed to serialize data: {}", e)))?;
    write_atomic(path, &contents)
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The temp file gets a random name next to the target, so existing
/// siblings are never touched, and is created owner-only on Unix.
pub fn write_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> SealResult<()> {
    let path = path.as_ref();

    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| {
                SealError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
            parent
        }
        None => Path::new("."),
    };

    // Same directory as the target, so the rename stays on one filesystem
    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| SealError::Io(format!("Failed to create temp file: {}", e)))?;

    temp.write_all(data)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| SealError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    temp.persist(path)
        .map_err(|e| SealError::Io(format!("Failed to rename temp file: {}", e.error)))?;

    Ok(())
}

/// Read all input from a file, or from stdin when `path` is `None` or `-`
pub fn read_input(path: Option<&Path>) -> SealResult<Vec<u8>> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => fs::read(path)
            .map_err(|e| SealError::Io(format!("Failed to read {}: {}", path.display(), e))),
        None => {
            let mut data = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut data)
                .map_err(|e| SealError::Io(format!("Failed to read stdin: {}", e)))?;
            Ok(data)
        }
    }
}

/// Write output to a file atomically, or to stdout when `path` is `None` or `-`
pub fn write_output(path: Option<&Path>, data: &[u8]) -> SealResult<()> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => write_atomic(path, data),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(data)
                .and_then(|_| stdout.flush())
                .map_err(|e| SealError::Io(format!("Failed to write stdout: {}", e)))
        }
    }
}

/// Human-readable label for an input/output location
pub fn describe(path: Option<&Path>) -> String {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => path.display().to_string(),
        None => "-".to_string(),
    }
}
