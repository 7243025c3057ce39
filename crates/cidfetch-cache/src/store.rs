//! # Cache Store
//!
//! Entries live at `{cache_dir}/{cache_key}`. No sidecar metadata is kept:
//! the presence of a regular file at that path is a cache hit, and hits are
//! never re-verified.
//!
//! ## Publish Protocol
//!
//! 1. Create the cache directory (with parents). An existing directory is
//!    fine; concurrent creation is fine.
//! 2. Write the payload into a fresh `.cidfetch-*.tmp` file in the cache
//!    directory and `sync_all` it.
//! 3. Rename it onto the entry path. Rename within one directory is atomic,
//!    so concurrent writers of the same key never expose a partial file;
//!    the last rename wins and every writer's content is equivalent.
//!
//! The temporary file is a [`tempfile::NamedTempFile`], which deletes
//! itself when dropped. Any early return in steps 2–3 therefore removes it.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use cidfetch_core::{CacheKey, StorageError, StorageOp, TEMP_FILE_PREFIX, TEMP_FILE_SUFFIX};

/// A flat on-disk cache of fetched payloads.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// The cache directory.
    dir: PathBuf,
}

impl CacheStore {
    /// Create a store rooted at `dir`.
    ///
    /// The directory does not need to exist yet; it is created on the first
    /// miss.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Return the cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Return the path an entry for `key` lives at.
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.as_str())
    }

    /// Whether a regular file exists for `key`.
    pub fn contains(&self, key: &CacheKey) -> bool {
        fs::metadata(self.entry_path(key))
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// Return the entry for `key`, fetching and publishing it on a miss.
    ///
    /// `fetch` runs at most once and only on a miss. Its error is returned
    /// unchanged and nothing is written. Storage failures are converted into
    /// the caller's error type.
    pub fn get_or_fetch<F, E>(&self, key: &CacheKey, fetch: F) -> Result<PathBuf, E>
    where
        F: FnOnce() -> Result<Vec<u8>, E>,
        E: From<StorageError>,
    {
        self.ensure_dir()?;
        let target = self.entry_path(key);
        if self.contains(key) {
            tracing::debug!(path = %target.display(), "cache hit");
            return Ok(target);
        }

        tracing::info!(path = %target.display(), "cache miss, fetching");
        let payload = fetch()?;
        self.publish(&target, |w| {
            w.write_all(&payload)
                .map_err(|e| StorageError::new(StorageOp::Write, &target, e).into())
        })?;
        Ok(target)
    }

    /// Return the entry for `key`, streaming it through `write` on a miss.
    ///
    /// `write` receives the temporary file. If it fails, the partial
    /// temporary file is removed and its error is returned unchanged.
    pub fn get_or_write<F, E>(&self, key: &CacheKey, write: F) -> Result<PathBuf, E>
    where
        F: FnOnce(&mut dyn Write) -> Result<(), E>,
        E: From<StorageError>,
    {
        self.ensure_dir()?;
        let target = self.entry_path(key);
        if self.contains(key) {
            tracing::debug!(path = %target.display(), "cache hit");
            return Ok(target);
        }

        tracing::info!(path = %target.display(), "cache miss, writing");
        self.publish(&target, write)?;
        Ok(target)
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        // create_dir_all treats an existing directory, including one created
        // concurrently by another process, as success.
        fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::new(StorageOp::CreateDir, &self.dir, e))
    }

    fn publish<F, E>(&self, target: &Path, write: F) -> Result<(), E>
    where
        F: FnOnce(&mut dyn Write) -> Result<(), E>,
        E: From<StorageError>,
    {
        let mut tmp = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .suffix(TEMP_FILE_SUFFIX)
            .tempfile_in(&self.dir)
            .map_err(|e| StorageError::new(StorageOp::CreateTemp, &self.dir, e))?;

        write(&mut tmp)?;
        tmp.flush()
            .map_err(|e| StorageError::new(StorageOp::Write, tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StorageError::new(StorageOp::Sync, tmp.path(), e))?;

        // On failure PersistError hands the NamedTempFile back; dropping it
        // removes the temporary file.
        tmp.persist(target)
            .map_err(|e| StorageError::new(StorageOp::Rename, target, e.error))?;

        tracing::info!(path = %target.display(), "published cache entry");
        Ok(())
    }
}
