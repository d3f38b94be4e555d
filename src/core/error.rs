//! Error types for the proxy list client and its transports

use serde_json::Value;

/// Failure raised by an [`HttpTransport`](crate::core::transport::HttpTransport)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Name resolution failed: {0}")]
    Dns(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Failed to read response body: {0}")]
    Body(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyScrapeError {
    /// The upstream payload did not carry a `proxies` array
    #[error("Unexpected response payload")]
    MalformedResponse { payload: Value },
    #[error("Upstream returned HTTP {status}")]
    Status { status: u16, body: String },
    #[error("Failed to decode proxy list: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Request cancelled")]
    Cancelled,
}

impl ProxyScrapeError {
    /// Raw upstream payload for `MalformedResponse`, for diagnostics
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ProxyScrapeError::MalformedResponse { payload } => Some(payload),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ProxyScrapeError::MalformedResponse { .. })
    }
}
