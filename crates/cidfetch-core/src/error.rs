//! # Error Types: Fetch Error Taxonomy
//!
//! Defines the error types used throughout cidfetch. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Transport errors name the URL that failed and are never retried here.
//! - Storage errors name the filesystem operation and the path it touched.
//! - Integrity errors carry both the expected prefix and the actual digest.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error from a collaborator (HTTP client, decoder).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for cidfetch.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The gateway could not be reached or the body could not be read.
    #[error("transport error calling {url}: {source}")]
    Transport {
        /// The request URL.
        url: String,
        /// The underlying client error.
        #[source]
        source: BoxError,
    },

    /// The gateway answered with a non-2xx status.
    #[error("gateway {url} returned {status}: {body}")]
    Status {
        /// The request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// The envelope could not be parsed or held no regular file.
    #[error("archive format error: {0}")]
    ArchiveFormat(String),

    /// The payload digest does not start with the expected prefix.
    #[error("invalid hash value (expected \"{expected}\", got \"{actual}\")")]
    Integrity {
        /// The expected digest prefix.
        expected: String,
        /// The full SHA-256 hex digest of the payload.
        actual: String,
    },

    /// A filesystem operation on the cache directory failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Invalid identifier, endpoint or option combination.
    #[error("configuration error: {0}")]
    Config(String),

    /// The caller-supplied decoder rejected the cached file.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        /// The cached file handed to the decoder.
        path: PathBuf,
        /// The decoder's error.
        #[source]
        source: BoxError,
    },
}

/// Coarse error categories, one per failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network or gateway failure, including non-2xx responses.
    Transport,
    /// Envelope has no extractable payload.
    ArchiveFormat,
    /// Digest mismatch.
    Integrity,
    /// Filesystem failure.
    Storage,
    /// Invalid configuration.
    Config,
    /// Decoder failure.
    Decode,
}

impl FetchError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } | Self::Status { .. } => ErrorKind::Transport,
            Self::ArchiveFormat(_) => ErrorKind::ArchiveFormat,
            Self::Integrity { .. } => ErrorKind::Integrity,
            Self::Storage(_) => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Config,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }
}

/// The filesystem operation a [`StorageError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageOp {
    /// Creating the cache directory.
    CreateDir,
    /// Creating the temporary file.
    CreateTemp,
    /// Writing payload bytes.
    Write,
    /// Flushing payload bytes to disk.
    Sync,
    /// Renaming the temporary file onto the entry.
    Rename,
    /// Reading a directory listing or file metadata.
    Inspect,
    /// Reading a cached file.
    Read,
    /// Removing a file.
    Remove,
}

impl StorageOp {
    /// Returns the operation name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateDir => "create directory",
            Self::CreateTemp => "create temporary file",
            Self::Write => "write",
            Self::Sync => "sync",
            Self::Rename => "rename",
            Self::Inspect => "inspect",
            Self::Read => "read",
            Self::Remove => "remove",
        }
    }
}

impl std::fmt::Display for StorageOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filesystem failure inside the cache directory.
#[derive(Error, Debug)]
#[error("storage error: {op} {}: {source}", path.display())]
pub struct StorageError {
    /// The operation that failed.
    pub op: StorageOp,
    /// The path the operation touched.
    pub path: PathBuf,
    /// The underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

impl StorageError {
    /// Construct a storage error.
    pub fn new(op: StorageOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            op,
            path: path.into(),
            source,
        }
    }
}
