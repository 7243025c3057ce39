//! Cached file format detection.
//!
//! A cached payload is either a zip container (the legacy packaging some
//! producers still publish) or raw serialized bytes. Only the leading
//! local-file-header signature is inspected; choosing a decode path is
//! the decoder's job.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use cidfetch_core::{StorageError, StorageOp};

/// Zip local file header signature.
const ZIP_MAGIC: [u8; 4] = *b"PK\x03\x04";

/// The container format of a cached payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadFormat {
    /// Zip container; the decoder must unpack it first.
    LegacyZip,
    /// Anything else; decoded directly.
    Raw,
}

impl PayloadFormat {
    /// Classify a file by its leading bytes.
    pub fn from_header(header: &[u8]) -> Self {
        if header.starts_with(&ZIP_MAGIC) {
            Self::LegacyZip
        } else {
            Self::Raw
        }
    }

    /// Returns the format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LegacyZip => "legacy-zip",
            Self::Raw => "raw",
        }
    }
}

impl std::fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the format of the file at `path`.
pub fn sniff_format(path: &Path) -> Result<PayloadFormat, StorageError> {
    let file = File::open(path).map_err(|e| StorageError::new(StorageOp::Read, path, e))?;
    let mut header = Vec::with_capacity(ZIP_MAGIC.len());
    file.take(ZIP_MAGIC.len() as u64)
        .read_to_end(&mut header)
        .map_err(|e| StorageError::new(StorageOp::Read, path, e))?;
    Ok(PayloadFormat::from_header(&header))
}
