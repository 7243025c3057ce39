//! Gateway configuration.
//!
//! Defaults point to a local IPFS daemon's RPC API. Override via
//! environment variables or explicit construction.

use std::time::Duration;

use crate::error::FetchError;
use crate::identity::GatewayEndpoint;

/// Default gateway base URL: the local IPFS daemon RPC API.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5001/api/v0";

/// Environment variable naming the gateway endpoint.
pub const ENDPOINT_VAR: &str = "CIDFETCH_ENDPOINT";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_VAR: &str = "CIDFETCH_TIMEOUT_SECS";

/// Configuration for connecting to a gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL the `get` method is resolved against.
    pub endpoint: GatewayEndpoint,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    /// Configuration for an explicit endpoint with no timeout.
    pub fn new(endpoint: GatewayEndpoint) -> Self {
        Self {
            endpoint,
            timeout: None,
        }
    }

    /// Configuration for the local daemon at [`DEFAULT_ENDPOINT`].
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Config` if the default URL cannot be parsed
    pub fn local() -> Result<Self, FetchError> {
        Ok(Self::new(GatewayEndpoint::parse(DEFAULT_ENDPOINT)?))
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configuration from an endpoint URL and an optional timeout in
    /// seconds, as read from the environment or the command line.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Config` for an invalid endpoint or a zero timeout.
    pub fn from_parts(endpoint: &str, timeout_secs: Option<u64>) -> Result<Self, FetchError> {
        let endpoint = GatewayEndpoint::parse(endpoint)?;
        let timeout = match timeout_secs {
            Some(0) => {
                return Err(FetchError::Config(
                    "gateway timeout must be greater than zero".into(),
                ))
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };
        Ok(Self { endpoint, timeout })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CIDFETCH_ENDPOINT` (default: `http://127.0.0.1:5001/api/v0`)
    /// - `CIDFETCH_TIMEOUT_SECS` (default: none)
    pub fn from_env() -> Result<Self, FetchError> {
        let endpoint =
            std::env::var(ENDPOINT_VAR).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let timeout_secs = match std::env::var(TIMEOUT_VAR) {
            Ok(s) => Some(parse_timeout_secs(&s)?),
            Err(_) => None,
        };
        Self::from_parts(&endpoint, timeout_secs)
    }
}

fn parse_timeout_secs(s: &str) -> Result<u64, FetchError> {
    s.trim()
        .parse()
        .map_err(|e| FetchError::Config(format!("invalid {TIMEOUT_VAR} {s:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_to_local_daemon() {
        let cfg = GatewayConfig::local().unwrap();
        assert_eq!(cfg.endpoint.as_url().as_str(), "http://127.0.0.1:5001/api/v0");
        assert!(cfg.timeout.is_none());
    }

    #[test]
    fn with_timeout_sets_value() {
        let cfg = GatewayConfig::local()
            .unwrap()
            .with_timeout(Some(Duration::from_secs(5)));
        assert_eq!(cfg.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn parse_timeout_secs_validates() {
        assert_eq!(parse_timeout_secs(" 30 ").unwrap(), 30);
        assert!(parse_timeout_secs("soon").is_err());
    }

    #[test]
    fn from_parts_builds_config() {
        let cfg = GatewayConfig::from_parts("http://gateway:5001/api/v0", Some(30)).unwrap();
        assert_eq!(cfg.endpoint.as_url().as_str(), "http://gateway:5001/api/v0");
        assert_eq!(cfg.timeout, Some(Duration::from_secs(30)));
        assert!(GatewayConfig::from_parts(DEFAULT_ENDPOINT, None).unwrap().timeout.is_none());
    }

    #[test]
    fn from_parts_rejects_zero_timeout_and_bad_endpoint() {
        let err = GatewayConfig::from_parts(DEFAULT_ENDPOINT, Some(0)).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
        assert!(GatewayConfig::from_parts("ftp://example.com", None).is_err());
    }

    // The only test in this crate that touches these variables.
    #[test]
    fn from_env_reads_variables() {
        std::env::set_var(ENDPOINT_VAR, "https://ipfs.example.org/api/v0");
        std::env::set_var(TIMEOUT_VAR, "45");
        let cfg = GatewayConfig::from_env();
        std::env::set_var(TIMEOUT_VAR, "0");
        let zero = GatewayConfig::from_env();
        std::env::remove_var(ENDPOINT_VAR);
        std::env::remove_var(TIMEOUT_VAR);
        let defaults = GatewayConfig::from_env();

        let cfg = cfg.unwrap();
        assert_eq!(cfg.endpoint.as_url().as_str(), "https://ipfs.example.org/api/v0");
        assert_eq!(cfg.timeout, Some(Duration::from_secs(45)));
        assert!(zero.is_err());
        let defaults = defaults.unwrap();
        assert_eq!(defaults.endpoint.as_url().as_str(), DEFAULT_ENDPOINT);
        assert!(defaults.timeout.is_none());
    }
}
