//! # cidfetch-loader: CID Load Pipeline
//!
//! Composes the gateway [`Fetcher`](cidfetch_gateway::Fetcher) and the
//! [`CacheStore`](cidfetch_cache::CacheStore) behind one call:
//!
//! ```text
//! LoadOptions ─► cache key + expected digest
//!            ─► CacheStore::get_or_fetch ─(miss)─► Fetcher::fetch
//!            ─► sniff format ─► Decoder::decode
//! ```
//!
//! The cache directory is always explicit. Nothing in this crate resolves
//! a process-wide default location.

pub mod decoder;
pub mod format;
pub mod loader;
pub mod options;

pub use decoder::Decoder;
pub use format::{sniff_format, PayloadFormat};
pub use loader::{load_from_cid, CachedArtifact, Loader};
pub use options::LoadOptions;
