//! # Identifier Newtypes
//!
//! Newtype wrappers for the identifiers cidfetch passes around. These
//! prevent accidental confusion: you cannot pass a [`Cid`] where a
//! [`CacheKey`] is expected, even though a CID is the default key.
//!
//! ## Security Invariant
//!
//! A [`CacheKey`] is a single path component. It cannot contain a path
//! separator, cannot be `.` or `..`, and cannot collide with the reserved
//! temporary-file prefix, so joining it onto the cache directory always
//! names a file directly inside that directory.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::FetchError;

/// File name prefix reserved for in-flight temporary files.
pub const TEMP_FILE_PREFIX: &str = ".cidfetch-";

/// File name suffix of in-flight temporary files.
pub const TEMP_FILE_SUFFIX: &str = ".tmp";

/// Content identifier of an object in the content-addressed backing store.
///
/// Opaque: only surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cid(String);

impl Cid {
    /// Create a CID, rejecting empty input.
    pub fn new(s: &str) -> Result<Self, FetchError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FetchError::Config("cid is required".into()));
        }
        Ok(Self(s.to_string()))
    }

    /// Return the CID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a cached file inside the cache directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Create a validated cache key.
    pub fn new(s: &str) -> Result<Self, FetchError> {
        if s.is_empty() {
            return Err(FetchError::Config("cache key is required".into()));
        }
        if s == "." || s == ".." {
            return Err(FetchError::Config(format!(
                "cache key must name a file, got {s:?}"
            )));
        }
        if let Some(c) = s.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
            return Err(FetchError::Config(format!(
                "cache key contains invalid character {c:?}: {s:?}"
            )));
        }
        if s.starts_with(TEMP_FILE_PREFIX) {
            return Err(FetchError::Config(format!(
                "cache key must not start with the reserved prefix {TEMP_FILE_PREFIX:?}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// The default key for a CID: the CID string itself.
    pub fn for_cid(cid: &Cid) -> Result<Self, FetchError> {
        Self::new(cid.as_str())
    }

    /// Return the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base URL of a gateway that resolves CIDs to envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GatewayEndpoint(Url);

impl GatewayEndpoint {
    /// Parse an `http` or `https` base URL.
    pub fn parse(s: &str) -> Result<Self, FetchError> {
        let url = Url::parse(s.trim())
            .map_err(|e| FetchError::Config(format!("invalid gateway endpoint {s:?}: {e}")))?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(FetchError::Config(format!(
                    "gateway endpoint must be http or https, got {other:?}"
                )));
            }
        }
        if url.cannot_be_a_base() {
            return Err(FetchError::Config(format!(
                "gateway endpoint cannot be a base URL: {s:?}"
            )));
        }
        Ok(Self(url))
    }

    /// The URL for an RPC method under this endpoint, e.g. `get`.
    pub fn method_url(&self, method: &str) -> Url {
        let mut url = self.0.clone();
        let path = format!("{}/{method}", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url
    }

    /// Access the base URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl std::fmt::Display for GatewayEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}
