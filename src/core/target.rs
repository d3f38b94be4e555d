//! Proxy Target Parsing
//!
//! Normalizes a proxy identifier into a canonical `{host, port, protocol}`
//! triple. Accepts either an address string (`"10.0.0.1:8080"`,
//! `"socks5://10.0.0.1:1080"`) or the `{ip, port, protocol}` projection of a
//! [`ProxyRecord`].

use crate::core::types::{protocol, ProxyRecord};
use url::Url;

/// Something that can be resolved to a proxy endpoint for a liveness check
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyCheckTarget {
    /// Raw address, with or without a `scheme://` prefix
    Address(String),
    /// Structured projection of a proxy record
    Endpoint {
        ip: String,
        port: u16,
        protocol: Option<String>,
    },
}

impl From<&str> for ProxyCheckTarget {
    fn from(address: &str) -> Self {
        ProxyCheckTarget::Address(address.to_string())
    }
}

impl From<String> for ProxyCheckTarget {
    fn from(address: String) -> Self {
        ProxyCheckTarget::Address(address)
    }
}

impl From<&ProxyRecord> for ProxyCheckTarget {
    fn from(record: &ProxyRecord) -> Self {
        ProxyCheckTarget::Endpoint {
            ip: record.ip.clone(),
            port: record.port,
            protocol: (!record.protocol.is_empty()).then(|| record.protocol.clone()),
        }
    }
}

/// Canonical proxy address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    pub host: String,
    pub port: u16,
    pub protocol: String,
}

impl ProxyEndpoint {
    /// Render as `protocol://host:port`
    pub fn to_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

impl std::fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_url())
    }
}

/// Resolve a check target into a [`ProxyEndpoint`]
///
/// Structured targets always succeed, with the protocol defaulting to
/// `http`. Strings without a scheme get `http://` prepended and are parsed
/// as URLs.
///
/// # Returns
/// * `Some(ProxyEndpoint)` - Target resolved
/// * `None` - URL parse failed, or hostname or port is missing. A port equal
///   to the scheme default is not kept by the URL parser and counts as missing.
pub fn parse_proxy_target(target: &ProxyCheckTarget) -> Option<ProxyEndpoint> {
    match target {
        ProxyCheckTarget::Endpoint { ip, port, protocol: proto } => Some(ProxyEndpoint {
            host: ip.clone(),
            port: *port,
            protocol: normalize_protocol(proto.as_deref().unwrap_or(protocol::HTTP)),
        }),
        ProxyCheckTarget::Address(address) => parse_address(address),
    }
}

fn parse_address(address: &str) -> Option<ProxyEndpoint> {
    let normalized = if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    };

    let url = Url::parse(&normalized).ok()?;
    let host = url.host_str().filter(|h| !h.is_empty())?;
    let port = url.port()?;

    Some(ProxyEndpoint {
        host: host.to_string(),
        port,
        protocol: normalize_protocol(url.scheme()),
    })
}

/// Normalize a protocol token
///
/// Strips a `://` separator and one trailing `:` then lowercases, so both
/// `"SOCKS5"` and `"socks5:"` become `"socks5"`.
pub fn normalize_protocol(protocol: &str) -> String {
    let stripped = protocol.replacen("://", "", 1);
    stripped
        .strip_suffix(':')
        .unwrap_or(&stripped)
        .to_lowercase()
}
