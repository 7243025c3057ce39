//! # Reclaim Subcommand
//!
//! Removes `.cidfetch-*.tmp` files left behind by writers that died before
//! publishing. Published entries are never touched.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use cidfetch_cache::CacheStore;

/// Default minimum age of a temporary file before it is reclaimed.
pub const DEFAULT_ORPHAN_AGE_SECS: u64 = 3600;

/// Arguments for the `cidfetch reclaim` subcommand.
#[derive(Args, Debug)]
pub struct ReclaimArgs {
    /// Directory holding cached files.
    #[arg(long, env = "CIDFETCH_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: PathBuf,

    /// Only remove temporary files last modified at least this many seconds ago.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_ORPHAN_AGE_SECS)]
    pub older_than_secs: u64,
}

/// Execute the reclaim subcommand.
pub fn run_reclaim(args: &ReclaimArgs) -> Result<u8> {
    let store = CacheStore::new(&args.cache_dir);
    let report = store
        .reclaim_orphans(Duration::from_secs(args.older_than_secs))
        .with_context(|| format!("failed to reclaim {}", args.cache_dir.display()))?;

    println!(
        "OK: removed {} orphaned temp file(s), retained {}",
        report.removed.len(),
        report.retained
    );
    Ok(0)
}
