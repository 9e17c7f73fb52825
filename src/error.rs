//! Centralized error types for usenet-import.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the usenet-import library.
///
/// Malformed individual messages are *not* errors: they are skipped and
/// recorded in [`crate::import::ImportStats`]. Errors here either stop one
/// archive stream or are genuine I/O and storage failures.
#[derive(Error, Debug)]
pub enum ImportError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("Archive file not found: {0}")]
    FileNotFound(PathBuf),

    /// A message block produced no header fields at all; the stream is not
    /// in a format this parser understands.
    #[error("Not a Usenet archive: no headers found at offset {offset}")]
    NotAnArchive { offset: u64 },

    /// An A News article did not start with the `A` magic byte.
    #[error("A News article lacks magic first byte at offset {offset}")]
    MissingMagic { offset: u64 },

    /// A timezone or dictionary table could not be loaded.
    #[error("Invalid table '{path}': {reason}")]
    InvalidTable { path: PathBuf, reason: String },

    /// The store snapshot is corrupt or was written by an incompatible version.
    #[error("Corrupt or incompatible snapshot '{path}': {reason}")]
    InvalidSnapshot { path: PathBuf, reason: String },

    /// The persistence collaborator rejected an operation.
    #[error("Store error: {0}")]
    Store(String),
}

/// Convenience alias for `Result<T, ImportError>`.
pub type Result<T> = std::result::Result<T, ImportError>;

impl ImportError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error abandons the rest of an archive stream while
    /// keeping the messages already emitted.
    pub fn is_stream_fatal(&self) -> bool {
        matches!(self, Self::NotAnArchive { .. } | Self::MissingMagic { .. })
    }
}

/// Allow `?` on `std::io::Error` when no path context is available
/// (in-memory streams). Prefer `ImportError::io` for files.
impl From<std::io::Error> for ImportError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<stream>"),
            source,
        }
    }
}
