//! Storage layer for envseal
//!
//! File and stdio plumbing for the command-line tool: atomic writes for
//! envelopes, plaintexts, and the settings file.

pub mod file_io;

pub use file_io::{describe, read_input, read_json, write_atomic, write_json_atomic, write_output};
