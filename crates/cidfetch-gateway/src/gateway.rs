//! Gateway transport.
//!
//! [`Gateway`] is the seam between the fetch pipeline and the network.
//! [`HttpGateway`] speaks the IPFS RPC `get` method: a `POST` to
//! `<endpoint>/get?arg=<cid>` whose 2xx body is a tar envelope.

use cidfetch_core::{Cid, FetchError, GatewayConfig, GatewayEndpoint};
use reqwest::blocking::Client;

/// Maximum number of body characters kept in a [`FetchError::Status`].
const ERROR_BODY_LIMIT: usize = 512;

/// Resolves a CID to the raw envelope bytes served for it.
pub trait Gateway {
    /// Fetch the full response body for `cid`.
    ///
    /// Non-2xx answers and transport failures are errors of the
    /// [`Transport`](cidfetch_core::ErrorKind::Transport) kind.
    fn get(&self, cid: &Cid) -> Result<Vec<u8>, FetchError>;
}

impl<G: Gateway + ?Sized> Gateway for &G {
    fn get(&self, cid: &Cid) -> Result<Vec<u8>, FetchError> {
        (**self).get(cid)
    }
}

/// Gateway reached over HTTP with a blocking client.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    endpoint: GatewayEndpoint,
    http: Client,
}

impl HttpGateway {
    /// Create a gateway client from configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Transport {
                url: config.endpoint.to_string(),
                source: Box::new(e),
            })?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            http,
        })
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &GatewayEndpoint {
        &self.endpoint
    }

    /// The request URL for `cid`.
    pub fn request_url(&self, cid: &Cid) -> reqwest::Url {
        let mut url = self.endpoint.method_url("get");
        url.query_pairs_mut().append_pair("arg", cid.as_str());
        url
    }
}

impl Gateway for HttpGateway {
    fn get(&self, cid: &Cid) -> Result<Vec<u8>, FetchError> {
        let url = self.request_url(cid);
        tracing::info!(%cid, %url, "requesting envelope from gateway");

        let resp = self
            .http
            .post(url.clone())
            .send()
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let bytes = resp.bytes().map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: Box::new(e),
        })?;
        tracing::debug!(%cid, bytes = bytes.len(), "received envelope");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cidfetch_core::ErrorKind;
    use std::time::Duration;

    fn gateway(endpoint: &str) -> HttpGateway {
        let config = GatewayConfig::new(GatewayEndpoint::parse(endpoint).unwrap());
        HttpGateway::new(&config).unwrap()
    }

    #[test]
    fn request_url_carries_cid_as_arg() {
        let gw = gateway("http://127.0.0.1:5001/api/v0");
        let cid = Cid::new("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG").unwrap();
        assert_eq!(
            gw.request_url(&cid).as_str(),
            "http://127.0.0.1:5001/api/v0/get?arg=QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
        );
    }

    #[test]
    fn request_url_encodes_query_value() {
        let gw = gateway("http://127.0.0.1:5001/api/v0");
        let cid = Cid::new("/ipfs/Qm a&b").unwrap();
        let url = gw.request_url(&cid);
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "arg");
        assert_eq!(value, "/ipfs/Qm a&b");
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn closed_port_is_a_transport_error() {
        let config = GatewayConfig::new(GatewayEndpoint::parse("http://127.0.0.1:1/api/v0").unwrap())
            .with_timeout(Some(Duration::from_millis(500)));
        let gw = HttpGateway::new(&config).unwrap();
        let cid = Cid::new("QmClosed").unwrap();
        let err = gw.get(&cid).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(format!("{err}").contains("127.0.0.1:1"));
    }
}
