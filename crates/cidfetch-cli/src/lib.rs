//! # cidfetch-cli: CLI Tool for cidfetch
//!
//! Provides the `cidfetch` command-line interface over the load pipeline.
//!
//! ## Subcommands
//!
//! - `cidfetch fetch`: Fetch a CID into a cache directory.
//! - `cidfetch verify`: Re-hash a cached entry against the hash in its name.
//! - `cidfetch reclaim`: Remove orphaned temporary files from a cache directory.
//!
//! ```bash
//! cidfetch fetch QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG --cache-dir ~/.cache/models
//! cidfetch fetch <CID> --cache-dir ./models --file-name resnet18-5c106cde.pth --check-hash
//! cidfetch verify resnet18-5c106cde.pth --cache-dir ./models
//! cidfetch reclaim --cache-dir ./models --older-than-secs 600
//! ```
//!
//! Each handler returns the process exit code: `0` on success, `1` when a
//! check fails. Errors are returned as `anyhow::Error` and reported by the
//! binary.

pub mod fetch;
pub mod reclaim;
pub mod verify;
