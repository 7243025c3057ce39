//! # cidfetch-core: Foundational Types for cidfetch
//!
//! Every other crate in the workspace depends on `cidfetch-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** [`Cid`], [`CacheKey`],
//!    [`GatewayEndpoint`] and [`DigestPrefix`] have validated constructors.
//!    A cache key can never carry a path separator, so a cache entry can
//!    never escape its directory.
//!
//! 2. **One error taxonomy.** [`FetchError`] covers transport, archive,
//!    integrity, storage, configuration and decode failures. Storage
//!    failures carry the operation and path that failed.
//!
//! 3. **Digests are lowercase hex.** [`sha256_hex()`] is the single digest
//!    path; prefix comparison is constant-time.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cidfetch-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod config;
pub mod digest;
pub mod error;
pub mod identity;
pub mod naming;

// Re-export primary types for ergonomic imports.
pub use config::{GatewayConfig, DEFAULT_ENDPOINT, ENDPOINT_VAR, TIMEOUT_VAR};
pub use digest::{sha256_hex, DigestPrefix};
pub use error::{BoxError, ErrorKind, FetchError, StorageError, StorageOp};
pub use identity::{CacheKey, Cid, GatewayEndpoint, TEMP_FILE_PREFIX, TEMP_FILE_SUFFIX};
pub use naming::hash_prefix_from_file_name;
