//! # Verify Subcommand
//!
//! Re-hashes a cached entry against the SHA-256 prefix embedded in its
//! name (`name-<hex>.ext`). Cache hits are never re-verified by the load
//! pipeline; this is the on-demand check.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use cidfetch_cache::CacheStore;
use cidfetch_core::{hash_prefix_from_file_name, CacheKey, FetchError};

/// Arguments for the `cidfetch verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Name of the cached entry, e.g. `resnet18-5c106cde.pth`.
    #[arg(value_name = "FILE_NAME")]
    pub file_name: String,

    /// Directory holding cached files.
    #[arg(long, env = "CIDFETCH_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: PathBuf,
}

/// Execute the verify subcommand.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let key = CacheKey::new(&args.file_name)?;
    let Some(prefix) = hash_prefix_from_file_name(key.as_str())? else {
        bail!(
            "{:?} does not embed a hash (expected name-<sha256 prefix>.ext)",
            key.as_str()
        );
    };

    let store = CacheStore::new(&args.cache_dir);
    let path = store.entry_path(&key);
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            println!("FAIL: not cached: {}", path.display());
            return Ok(1);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    match prefix.verify(&bytes) {
        Ok(()) => {
            println!("OK: {key} matches sha256 prefix {prefix}");
            Ok(0)
        }
        Err(FetchError::Integrity { expected, actual }) => {
            println!("FAIL: {key} sha256 {actual} does not start with {expected}");
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}
