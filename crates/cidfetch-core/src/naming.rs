//! File name conventions.
//!
//! Cached files may follow the convention `name-<sha256 prefix>.ext`, where
//! the hyphen-delimited hex run before the extension is the leading part of
//! the payload's SHA-256 digest.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::digest::DigestPrefix;
use crate::error::FetchError;

/// Hyphen-delimited hex run immediately before a `.`.
static HASH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-([a-f0-9]*)\.").expect("Invalid HASH_RE regex"));

/// Extract the digest prefix embedded in a file name, if any.
///
/// The first match wins. An empty hex run (`name-.ext`) carries no prefix.
/// A hex run that is not a valid digest prefix (longer than a full SHA-256
/// digest) is a `Config` error rather than "no hash".
pub fn hash_prefix_from_file_name(file_name: &str) -> Result<Option<DigestPrefix>, FetchError> {
    let Some(hex) = HASH_RE
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return Ok(None);
    };
    if hex.is_empty() {
        return Ok(None);
    }
    DigestPrefix::new(hex).map(Some)
}
