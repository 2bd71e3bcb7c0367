//! Configuration module for envseal
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SealPaths;
pub use settings::{EnvelopeFormat, Settings};
