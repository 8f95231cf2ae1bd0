//! HTTP transport seam.
//!
//! The request executor talks to the listing service through `Transport` so the
//! retry/validation logic can be exercised without a network. `HttpTransport` is
//! the real blocking client; `MockTransport` (tests and the `test-util`
//! feature) replays scripted responses.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::TransportError;

/// Status line and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A blocking GET with query parameters.
pub trait Transport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, TransportError> {
        (**self).get(url, query)
    }
}

/// `reqwest` blocking client with a fixed request timeout.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, TransportError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(classify)?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| TransportError::Body(e.without_url().to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    // reqwest embeds the full URL (service key included) in its Display output.
    let err = err.without_url();
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}

#[cfg(any(test, feature = "test-util"))]
mod mock;

#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockTransport, RecordedRequest};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_2xx_counts_as_success() {
        assert!(HttpResponse::ok("{}").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(503, "unavailable").is_success());
    }
}
