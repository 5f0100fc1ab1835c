//! Error types for chatview
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Main error type for chatview operations
///
/// Covers the failures that can occur while locating session files,
/// reading and parsing them, loading configuration, and validating
/// command-line arguments.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// A directory, session file, or matching session does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The process lacks permission to read a path
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// A single JSONL line could not be decoded into a record
    ///
    /// Never fatal: the parser skips the line and keeps going.
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord {
        /// 1-based line number inside the session file
        line: usize,
        /// Decoder message
        message: String,
    },

    /// Invalid command-line flag value or combination
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ViewerError {
    /// Classify an IO failure on `path`
    ///
    /// Missing paths become [`ViewerError::NotFound`] and permission
    /// failures become [`ViewerError::AccessDenied`]; everything else is
    /// kept as [`ViewerError::Io`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chatview::error::ViewerError;
    /// use std::io;
    /// use std::path::Path;
    ///
    /// let err = io::Error::new(io::ErrorKind::NotFound, "gone");
    /// let mapped = ViewerError::from_io(err, Path::new("/tmp/a.jsonl"));
    /// assert!(matches!(mapped, ViewerError::NotFound(_)));
    /// ```
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.display().to_string()),
            io::ErrorKind::PermissionDenied => Self::AccessDenied(path.display().to_string()),
            _ => Self::Io(err),
        }
    }
}

/// Result type alias for chatview operations
///
/// Uses `anyhow::Error` so callers can attach context; code that needs the
/// error kind downcasts to [`ViewerError`].
pub type Result<T> = anyhow::Result<T>;
