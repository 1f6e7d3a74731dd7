//! Error types for configuration handling
//!
//! Every error here is recoverable: load failures fall back to the previous
//! (or default) timeout, write failures leave in-memory state untouched, and
//! validation failures block the apply without changing anything.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading, validating, or persisting the timeout setting
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file does not exist yet (normal on first run)
    #[error("settings file does not exist: {0}")]
    Missing(PathBuf),

    /// Settings file exists but could not be read
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    /// First line of the settings file is longer than the allowed 9 characters
    #[error("settings line contains too many characters ({0})")]
    LineTooLong(usize),

    /// Value is not a strictly positive decimal integer
    #[error("not a valid timeout in seconds: {0:?}")]
    InvalidValue(String),

    /// Settings file could not be written
    #[error("failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}
