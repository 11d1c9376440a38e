//! HTTP seam between the adapter and the service.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::debug;

use crate::error::Result;

/// User agent string for service requests.
const USER_AGENT_VALUE: &str = concat!("qaaws/", env!("CARGO_PKG_VERSION"));

/// Content type of a SOAP 1.1 request.
const SOAP_CONTENT_TYPE: &str = "text/xml;charset=UTF-8";

/// Status and body of an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends HTTP requests on behalf of the adapter.
///
/// Implementations return every response, successful or not; callers
/// decide what a status means.
pub trait Transport {
    /// Fetch a document (the WSDL).
    fn get(&self, url: &str) -> Result<HttpResponse>;

    /// POST a SOAP envelope.
    fn post_xml(&self, url: &str, soap_action: &str, body: String) -> Result<HttpResponse>;
}

/// Blocking `reqwest` transport.
///
/// The underlying client is built on first use and reused afterwards.
#[derive(Debug)]
pub struct HttpTransport {
    timeout: Duration,
    client: OnceLock<Client>,
}

impl HttpTransport {
    /// Create a transport whose requests time out after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            client: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        debug!("Creating HTTP client (timeout: {:?})", self.timeout);
        let client = Client::builder().timeout(self.timeout).build()?;
        Ok(self.client.get_or_init(|| client))
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        debug!("Fetching {}", url);
        let response = self
            .client()?
            .get(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }

    fn post_xml(&self, url: &str, soap_action: &str, body: String) -> Result<HttpResponse> {
        debug!("POST {} (SOAPAction: {}, {} bytes)", url, soap_action, body.len());
        let response = self
            .client()?
            .post(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", format!("\"{soap_action}\""))
            .body(body)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let ok = HttpResponse {
            status: 200,
            body: String::new(),
        };
        let fault = HttpResponse {
            status: 500,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!fault.is_success());
    }

    #[test]
    fn test_client_is_built_once() {
        let transport = HttpTransport::new(Duration::from_secs(5));
        assert_eq!(transport.timeout(), Duration::from_secs(5));
        let first: *const Client = transport.client().unwrap();
        let second: *const Client = transport.client().unwrap();
        assert_eq!(first, second);
    }
}
