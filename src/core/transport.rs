//! HTTP Transport Abstraction
//!
//! The client never talks to an HTTP stack directly. Every outbound GET goes
//! through [`HttpTransport`], so callers can inject their own implementation
//! to reuse a connection pool or substitute a stub in tests.

use crate::core::error::TransportError;
use crate::core::target::ProxyEndpoint;
use std::collections::HashMap;
use std::time::Duration;

#[cfg(feature = "isahc-transport")]
use isahc::config::{Configurable, RedirectPolicy};
#[cfg(feature = "isahc-transport")]
use isahc::{AsyncReadResponseExt, HttpClient, Request};

/// Fully resolved GET request handed to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// Complete URL including the query string
    pub url: String,
    pub timeout: Duration,
    pub headers: HashMap<String, String>,
    /// Route the request through this proxy
    pub proxy: Option<ProxyEndpoint>,
}

/// Raw HTTP response returned by a transport
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Partial request configuration, layered library < client < call
///
/// Header names are case-insensitive and stored lowercased, so a layer's
/// `accept` replaces a lower layer's `Accept`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    pub timeout_ms: Option<u64>,
    pub headers: HashMap<String, String>,
    pub proxy: Option<ProxyEndpoint>,
}

impl RequestConfig {
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(header_key(&name.into()), value.into());
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyEndpoint) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win
    pub fn merged_with(&self, overrides: &RequestConfig) -> RequestConfig {
        let headers = self
            .headers
            .iter()
            .chain(overrides.headers.iter())
            .map(|(k, v)| (header_key(k), v.clone()))
            .collect();

        RequestConfig {
            timeout_ms: overrides.timeout_ms.or(self.timeout_ms),
            headers,
            proxy: overrides.proxy.clone().or_else(|| self.proxy.clone()),
        }
    }
}

fn header_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// HTTP client abstraction for dependency injection and testing
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute a GET request and return the full response
    ///
    /// Non-2xx statuses are returned as responses, not errors; only failures
    /// to complete the exchange are reported as [`TransportError`].
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Production transport implementation using isahc
#[cfg(feature = "isahc-transport")]
pub struct IsahcTransport {
    client: HttpClient,
}

#[cfg(feature = "isahc-transport")]
impl IsahcTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = HttpClient::builder()
            .redirect_policy(RedirectPolicy::Limit(5))
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "isahc-transport")]
#[async_trait::async_trait]
impl HttpTransport for IsahcTransport {
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = Request::get(&request.url).timeout(request.timeout);

        if let Some(proxy) = &request.proxy {
            let proxy_uri = proxy
                .to_url()
                .parse::<isahc::http::Uri>()
                .map_err(|e| TransportError::InvalidRequest(format!("Invalid proxy {}: {}", proxy, e)))?;
            builder = builder.proxy(Some(proxy_uri));
        }

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let http_request = builder
            .body(Vec::new())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let mut response = self
            .client
            .send_async(http_request)
            .await
            .map_err(classify_isahc_error)?;

        let status_code = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(TransportResponse { status_code, body })
    }
}

#[cfg(feature = "isahc-transport")]
fn classify_isahc_error(error: isahc::Error) -> TransportError {
    use isahc::error::ErrorKind;

    match error.kind() {
        ErrorKind::Timeout => TransportError::Timeout,
        ErrorKind::NameResolution => TransportError::Dns(error.to_string()),
        ErrorKind::ConnectionFailed => TransportError::Connect(error.to_string()),
        ErrorKind::InvalidRequest => TransportError::InvalidRequest(error.to_string()),
        _ => TransportError::Request(error.to_string()),
    }
}
