//! Error types for the artifact crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for artifact operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Errors that make a whole artifact unreadable.
///
/// A single bad record is not an `ArtifactError`; it is reported as an
/// [`IndexError::MalformedRecord`](docsearch_core::IndexError) and skipped.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Reading the artifact failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// JSON document could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The artifact does not have the expected layout.
    #[error("invalid artifact format: {message}")]
    InvalidFormat {
        /// Description of the format issue.
        message: String,
    },

    /// The binary table was written by an unknown format version.
    #[error("unsupported table version: {version}")]
    UnsupportedVersion {
        /// Version byte found in the header.
        version: u8,
    },

    /// The binary table trailer does not match its contents.
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Digest stored in the trailer (hex).
        expected: String,
        /// Digest computed over the contents (hex).
        actual: String,
    },

    /// Input ended in the middle of a value.
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof {
        /// What was being read.
        context: &'static str,
    },

    /// A string field is not valid UTF-8.
    #[error("invalid UTF-8 in {context}")]
    InvalidUtf8 {
        /// What was being read.
        context: &'static str,
    },

    /// A search script is not a well-formed literal.
    #[error("syntax error at byte {offset}: {message}")]
    Syntax {
        /// Byte offset of the problem.
        offset: usize,
        /// Description of the problem.
        message: String,
    },

    /// No known format matches the leading bytes.
    #[error("unrecognized artifact format")]
    UnknownFormat,
}

impl ArtifactError {
    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates a syntax error.
    pub fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            offset,
            message: message.into(),
        }
    }

    /// Creates an I/O error for a path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
