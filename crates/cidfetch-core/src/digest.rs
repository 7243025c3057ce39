//! # Payload Digests
//!
//! SHA-256 hex digests of fetched payloads and the [`DigestPrefix`] they
//! are checked against.
//!
//! ## Integrity Invariant
//!
//! A payload passes verification iff the lowercase hex SHA-256 digest of
//! its bytes starts with the prefix. The comparison covers exactly
//! `prefix.len()` characters and runs in constant time.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::FetchError;

/// Length of a full SHA-256 hex digest.
const SHA256_HEX_LEN: usize = 64;

/// Compute the lowercase SHA-256 hex digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// A leading substring of an expected SHA-256 hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigestPrefix(String);

impl DigestPrefix {
    /// Create a validated prefix. Input is normalized to lowercase.
    pub fn new(s: &str) -> Result<Self, FetchError> {
        let p = s.trim().to_lowercase();
        if p.is_empty() {
            return Err(FetchError::Config("digest prefix must not be empty".into()));
        }
        if p.len() > SHA256_HEX_LEN {
            return Err(FetchError::Config(format!(
                "digest prefix too long: {} chars (max {SHA256_HEX_LEN})",
                p.len()
            )));
        }
        if !p.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FetchError::Config(format!(
                "digest prefix contains non-hex characters: {s:?}"
            )));
        }
        Ok(Self(p))
    }

    /// Return the prefix as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a full hex digest starts with this prefix.
    pub fn matches(&self, digest_hex: &str) -> bool {
        let want = self.0.as_bytes();
        match digest_hex.as_bytes().get(..want.len()) {
            Some(head) => bool::from(head.ct_eq(want)),
            None => false,
        }
    }

    /// Verify `payload` against this prefix.
    ///
    /// Returns [`FetchError::Integrity`] carrying the actual digest on
    /// mismatch.
    pub fn verify(&self, payload: &[u8]) -> Result<(), FetchError> {
        let actual = sha256_hex(payload);
        if self.matches(&actual) {
            Ok(())
        } else {
            Err(FetchError::Integrity {
                expected: self.0.clone(),
                actual,
            })
        }
    }
}

impl std::fmt::Display for DigestPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    // sha256("abc")
    const ABC_DIGEST: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn sha256_hex_known_vector() {
        assert_eq!(sha256_hex(b"abc"), ABC_DIGEST);
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn prefix_normalizes_case() {
        assert_eq!(DigestPrefix::new("BA7816BF").unwrap().as_str(), "ba7816bf");
    }

    #[test]
    fn prefix_rejects_invalid_input() {
        assert!(DigestPrefix::new("").is_err());
        assert!(DigestPrefix::new("xyz").is_err());
        assert!(DigestPrefix::new(&"a".repeat(65)).is_err());
    }

    #[test]
    fn verify_accepts_matching_prefix() {
        let prefix = DigestPrefix::new("ba7816bf").unwrap();
        assert!(prefix.verify(b"abc").is_ok());
        let full = DigestPrefix::new(ABC_DIGEST).unwrap();
        assert!(full.verify(b"abc").is_ok());
    }

    #[test]
    fn verify_rejects_mismatch_with_integrity_error() {
        let prefix = DigestPrefix::new("ffff").unwrap();
        let err = prefix.verify(b"abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Integrity);
        match err {
            FetchError::Integrity { expected, actual } => {
                assert_eq!(expected, "ffff");
                assert_eq!(actual, ABC_DIGEST);
            }
            other => panic!("expected integrity error, got {other:?}"),
        }
    }

    #[test]
    fn matches_rejects_short_digest() {
        let prefix = DigestPrefix::new("abcdef").unwrap();
        assert!(!prefix.matches("abc"));
    }

    proptest! {
        #[test]
        fn every_leading_slice_of_the_digest_verifies(data in proptest::collection::vec(any::<u8>(), 0..256), len in 1usize..=64) {
            let digest = sha256_hex(&data);
            let prefix = DigestPrefix::new(&digest[..len]).unwrap();
            prop_assert!(prefix.verify(&data).is_ok());
        }
    }
}
