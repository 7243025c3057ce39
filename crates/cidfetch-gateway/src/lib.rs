//! # cidfetch-gateway: CID Fetcher
//!
//! Resolves a CID to payload bytes in three steps:
//!
//! 1. **Gateway request**: [`Gateway::get()`] returns the full response
//!    body for a CID. [`HttpGateway`] issues `POST <endpoint>/get?arg=<cid>`
//!    with a blocking client.
//! 2. **Envelope extraction**: [`extract_payload()`] reads the body as a tar
//!    archive and returns the contents of the first regular-file entry.
//! 3. **Verification**: when a [`DigestPrefix`](cidfetch_core::DigestPrefix)
//!    is supplied, the payload's SHA-256 hex digest must start with it.
//!
//! [`Fetcher`] composes the three. It performs no filesystem writes and
//! never retries: the caller owns retry policy.

pub mod archive;
pub mod fetcher;
pub mod gateway;

pub use archive::extract_payload;
pub use fetcher::Fetcher;
pub use gateway::{Gateway, HttpGateway};
