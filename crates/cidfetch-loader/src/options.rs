//! Load options.
//!
//! The recognized configuration surface of a load: gateway, cache
//! directory, cache key override and hash checking.
//!
//! ## Hash Checking
//!
//! With `check_hash` set, the expected digest prefix is taken from the
//! cache key using the `name-<hex>.ext` convention. A key that does not
//! follow the convention is a configuration error: verification was
//! requested and cannot be performed, so the load fails instead of
//! silently skipping it.

use std::path::PathBuf;

use cidfetch_core::{
    hash_prefix_from_file_name, CacheKey, Cid, DigestPrefix, FetchError, GatewayConfig,
};

/// Options for loading one CID.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Gateway to fetch from on a miss.
    pub gateway: GatewayConfig,
    /// Directory holding cached files.
    pub cache_dir: PathBuf,
    /// Cache key override. Defaults to the CID string.
    pub file_name: Option<String>,
    /// Verify the payload against the hash embedded in the cache key.
    pub check_hash: bool,
}

impl LoadOptions {
    /// Options for the local gateway and the given cache directory.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self, FetchError> {
        Ok(Self {
            gateway: GatewayConfig::local()?,
            cache_dir: cache_dir.into(),
            file_name: None,
            check_hash: false,
        })
    }

    /// Use a different gateway.
    pub fn with_gateway(mut self, gateway: GatewayConfig) -> Self {
        self.gateway = gateway;
        self
    }

    /// Store the payload under `file_name` instead of the CID.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Enable or disable hash checking.
    pub fn with_check_hash(mut self, check_hash: bool) -> Self {
        self.check_hash = check_hash;
        self
    }
}

/// Resolve the cache key: `file_name` if given, otherwise the CID.
pub fn resolve_cache_key(cid: &Cid, file_name: Option<&str>) -> Result<CacheKey, FetchError> {
    match file_name {
        Some(name) => CacheKey::new(name),
        None => CacheKey::for_cid(cid),
    }
}

/// Resolve the expected digest prefix for `key`.
pub fn resolve_expected_digest(
    key: &CacheKey,
    check_hash: bool,
) -> Result<Option<DigestPrefix>, FetchError> {
    if !check_hash {
        return Ok(None);
    }
    match hash_prefix_from_file_name(key.as_str())? {
        Some(prefix) => Ok(Some(prefix)),
        None => Err(FetchError::Config(format!(
            "check_hash requested but {key:?} does not embed a hash (expected name-<sha256 prefix>.ext)",
            key = key.as_str()
        ))),
    }
}
