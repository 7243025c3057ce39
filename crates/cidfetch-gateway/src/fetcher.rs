//! # Fetcher
//!
//! Resolves a CID through a [`Gateway`], extracts the payload from the
//! returned envelope, and optionally verifies it against a digest prefix.
//!
//! ## Side Effects
//!
//! One gateway request per call. No filesystem writes, no retries.

use cidfetch_core::{Cid, DigestPrefix, FetchError};

use crate::archive::extract_payload;
use crate::gateway::Gateway;

/// Fetches verified payload bytes for a CID.
#[derive(Debug, Clone)]
pub struct Fetcher<G> {
    gateway: G,
}

impl<G: Gateway> Fetcher<G> {
    /// Create a fetcher over the given gateway.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Access the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Fetch the payload for `cid`.
    ///
    /// When `expected` is present, the SHA-256 hex digest of the payload
    /// must start with it, otherwise [`FetchError::Integrity`] is returned.
    pub fn fetch(&self, cid: &Cid, expected: Option<&DigestPrefix>) -> Result<Vec<u8>, FetchError> {
        let envelope = self.gateway.get(cid)?;
        let payload = extract_payload(&envelope)?;

        if let Some(prefix) = expected {
            prefix.verify(&payload)?;
            tracing::debug!(%cid, %prefix, "payload digest verified");
        }

        tracing::info!(%cid, bytes = payload.len(), "fetched payload");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cidfetch_core::{sha256_hex, ErrorKind};
    use std::cell::Cell;

    /// Serves one canned envelope and counts requests.
    struct StaticGateway {
        body: Result<Vec<u8>, u16>,
        calls: Cell<usize>,
    }

    impl StaticGateway {
        fn serving(body: Vec<u8>) -> Self {
            Self {
                body: Ok(body),
                calls: Cell::new(0),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                body: Err(status),
                calls: Cell::new(0),
            }
        }
    }

    impl Gateway for StaticGateway {
        fn get(&self, cid: &Cid) -> Result<Vec<u8>, FetchError> {
            self.calls.set(self.calls.get() + 1);
            match &self.body {
                Ok(body) => Ok(body.clone()),
                Err(status) => Err(FetchError::Status {
                    url: format!("http://gateway/get?arg={cid}"),
                    status: *status,
                    body: "not found".into(),
                }),
            }
        }
    }

    fn single_file_envelope(data: &[u8]) -> Vec<u8> {
        let mut header = tar::Header::new_gnu();
        header.set_path("model.bin").unwrap();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_cksum();
        let mut builder = tar::Builder::new(Vec::new());
        builder.append(&header, data).unwrap();
        builder.into_inner().unwrap()
    }

    fn cid() -> Cid {
        Cid::new("QmTestCid").unwrap()
    }

    #[test]
    fn fetch_without_prefix_returns_payload() {
        let fetcher = Fetcher::new(StaticGateway::serving(single_file_envelope(b"\x00\x01")));
        assert_eq!(fetcher.fetch(&cid(), None).unwrap(), b"\x00\x01");
        assert_eq!(fetcher.gateway().calls.get(), 1);
    }

    #[test]
    fn fetch_with_matching_prefix_succeeds() {
        let payload = b"weights".to_vec();
        let digest = sha256_hex(&payload);
        let prefix = DigestPrefix::new(&digest[..8]).unwrap();
        let fetcher = Fetcher::new(StaticGateway::serving(single_file_envelope(&payload)));
        assert_eq!(fetcher.fetch(&cid(), Some(&prefix)).unwrap(), payload);
    }

    #[test]
    fn fetch_with_wrong_prefix_is_integrity_error() {
        let payload = b"weights".to_vec();
        assert!(!sha256_hex(&payload).starts_with("ffff"));
        let prefix = DigestPrefix::new("ffff").unwrap();
        let fetcher = Fetcher::new(StaticGateway::serving(single_file_envelope(&payload)));
        let err = fetcher.fetch(&cid(), Some(&prefix)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Integrity);
    }

    #[test]
    fn gateway_failure_propagates_unchanged() {
        let fetcher = Fetcher::new(StaticGateway::failing(404));
        let err = fetcher.fetch(&cid(), None).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(fetcher.gateway().calls.get(), 1);
    }

    #[test]
    fn fetch_through_gateway_reference() {
        let gw = StaticGateway::serving(single_file_envelope(b"shared"));
        let fetcher = Fetcher::new(&gw);
        assert_eq!(fetcher.fetch(&cid(), None).unwrap(), b"shared");
        assert_eq!(gw.calls.get(), 1);
    }
}
