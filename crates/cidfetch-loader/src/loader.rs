//! # Loader
//!
//! Resolves a CID to a decoded value through the cache.
//!
//! ## Order of Checks
//!
//! The cache key and expected digest are resolved before the cache is
//! consulted, so an invalid `file_name` or an unusable `check_hash`
//! request fails the same way on a hit and on a miss, and never reaches
//! the gateway.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use cidfetch_cache::CacheStore;
use cidfetch_core::{CacheKey, Cid, FetchError};
use cidfetch_gateway::{Fetcher, Gateway, HttpGateway};

use crate::decoder::Decoder;
use crate::format::{sniff_format, PayloadFormat};
use crate::options::{resolve_cache_key, resolve_expected_digest, LoadOptions};

/// A cached payload ready for decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedArtifact {
    /// The key the payload is cached under.
    pub key: CacheKey,
    /// The cached file.
    pub path: PathBuf,
    /// The detected container format.
    pub format: PayloadFormat,
    /// Whether this call fetched the payload (`false` on a cache hit).
    pub fetched: bool,
}

/// Fetches CIDs through a cache directory.
#[derive(Debug, Clone)]
pub struct Loader<G> {
    fetcher: Fetcher<G>,
    store: CacheStore,
}

impl Loader<HttpGateway> {
    /// Build a loader for the gateway and cache directory in `options`.
    pub fn from_options(options: &LoadOptions) -> Result<Self, FetchError> {
        let gateway = HttpGateway::new(&options.gateway)?;
        Ok(Self::new(gateway, &options.cache_dir))
    }
}

impl<G: Gateway> Loader<G> {
    /// Create a loader over `gateway` caching into `cache_dir`.
    pub fn new(gateway: G, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher: Fetcher::new(gateway),
            store: CacheStore::new(cache_dir),
        }
    }

    /// Access the cache store.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Access the fetcher.
    pub fn fetcher(&self) -> &Fetcher<G> {
        &self.fetcher
    }

    /// Make `cid` available in the cache and return the cached file.
    ///
    /// `file_name` overrides the cache key. With `check_hash`, the payload
    /// is verified on a miss against the hash embedded in the key.
    pub fn cache(
        &self,
        cid: &Cid,
        file_name: Option<&str>,
        check_hash: bool,
    ) -> Result<CachedArtifact, FetchError> {
        let key = resolve_cache_key(cid, file_name)?;
        let expected = resolve_expected_digest(&key, check_hash)?;

        let fetched = Cell::new(false);
        let path = self.store.get_or_fetch(&key, || {
            fetched.set(true);
            tracing::info!(%cid, key = %key, "downloading into cache");
            self.fetcher.fetch(cid, expected.as_ref())
        })?;
        let format = sniff_format(&path)?;

        Ok(CachedArtifact {
            key,
            path,
            format,
            fetched: fetched.get(),
        })
    }

    /// Make `cid` available in the cache and decode it with `decoder`.
    pub fn load<D: Decoder>(
        &self,
        cid: &Cid,
        file_name: Option<&str>,
        check_hash: bool,
        decoder: &D,
    ) -> Result<D::Output, FetchError> {
        let artifact = self.cache(cid, file_name, check_hash)?;
        decode(&artifact.path, artifact.format, decoder)
    }
}

fn decode<D: Decoder>(path: &Path, format: PayloadFormat, decoder: &D) -> Result<D::Output, FetchError> {
    tracing::debug!(path = %path.display(), %format, "decoding cached file");
    decoder
        .decode(path, format)
        .map_err(|e| FetchError::Decode {
            path: path.to_path_buf(),
            source: e.into(),
        })
}

/// Load `cid` with `options` over HTTP and decode the cached file.
pub fn load_from_cid<D: Decoder>(
    cid: &Cid,
    options: &LoadOptions,
    decoder: &D,
) -> Result<D::Output, FetchError> {
    Loader::from_options(options)?.load(
        cid,
        options.file_name.as_deref(),
        options.check_hash,
        decoder,
    )
}
