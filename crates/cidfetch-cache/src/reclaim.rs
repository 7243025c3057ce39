//! Orphaned temporary file reclamation.
//!
//! Only files named `.cidfetch-*.tmp` are candidates. Cache entries can
//! never carry that prefix (see [`CacheKey`](cidfetch_core::CacheKey)), so
//! reclamation cannot remove a published entry.
//!
//! A temporary file younger than the age threshold may belong to a writer
//! that is still running; removing it would make that writer's rename fail.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use cidfetch_core::{StorageError, StorageOp, TEMP_FILE_PREFIX, TEMP_FILE_SUFFIX};

use crate::store::CacheStore;

/// Outcome of a reclamation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReclaimReport {
    /// Temporary files that were removed.
    pub removed: Vec<PathBuf>,
    /// Temporary files left in place because they are too recent.
    pub retained: usize,
}

impl CacheStore {
    /// Remove temporary files whose last modification is at least
    /// `older_than` ago.
    ///
    /// A missing cache directory yields an empty report. A file that
    /// disappears mid-pass (renamed by its writer or removed by another
    /// reclaimer) is skipped.
    pub fn reclaim_orphans(&self, older_than: Duration) -> Result<ReclaimReport, StorageError> {
        let mut report = ReclaimReport::default();
        let entries = match fs::read_dir(self.dir()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(report),
            Err(e) => return Err(StorageError::new(StorageOp::Inspect, self.dir(), e)),
        };

        let now = SystemTime::now();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::new(StorageOp::Inspect, self.dir(), e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !name.starts_with(TEMP_FILE_PREFIX) || !name.ends_with(TEMP_FILE_SUFFIX) {
                continue;
            }

            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(StorageError::new(StorageOp::Inspect, &path, e)),
            };
            if !metadata.is_file() {
                continue;
            }

            let modified = metadata
                .modified()
                .map_err(|e| StorageError::new(StorageOp::Inspect, &path, e))?;
            let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
            if age < older_than {
                report.retained += 1;
                continue;
            }

            match fs::remove_file(&path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), age_secs = age.as_secs(), "removed orphaned temporary file");
                    report.removed.push(path);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(StorageError::new(StorageOp::Remove, &path, e)),
            }
        }

        report.removed.sort();
        Ok(report)
    }
}
