//! # cidfetch-cache: Atomic Payload Cache
//!
//! A flat directory holding one file per [`CacheKey`](cidfetch_core::CacheKey).
//! [`CacheStore::get_or_fetch()`] returns the path of an existing entry
//! without calling the fetch closure; on a miss it fetches, writes to a
//! temporary file in the same directory, and renames it into place.
//!
//! ## Atomicity Invariant
//!
//! An observer of `<cache_dir>/<key>` sees either no file or a complete one.
//! Every error path after the temporary file exists removes it.
//!
//! ## Maintenance
//!
//! A process killed mid-write leaves at most a stray `.cidfetch-*.tmp` file.
//! [`CacheStore::reclaim_orphans()`] removes those once they are old enough
//! that no live writer can still own them.

pub mod reclaim;
pub mod store;

pub use reclaim::ReclaimReport;
pub use store::CacheStore;
