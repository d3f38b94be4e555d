pub mod client;
pub mod debug_logger;
pub mod error;
pub mod liveness;
pub mod params;
pub mod ranking;
pub mod target;
pub mod transport;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use client::{FetchOptions, ProxyScrapeClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_MS, MIN_TIMEOUT_MS};
pub use debug_logger::DebugLogger;
pub use error::{ProxyScrapeError, TransportError};
pub use liveness::{extract_echoed_ip, CHECK_PROXY_TIMEOUT_MS, IP_ECHO_ENDPOINT};
pub use params::{build_params, QueryParams, QueryValue, BASE_QUERY};
pub use ranking::{compare_proxies, rank_proxies, select_best, DEFAULT_BEST_COUNT};
pub use target::{normalize_protocol, parse_proxy_target, ProxyCheckTarget, ProxyEndpoint};
pub use transport::{HttpTransport, RequestConfig, TransportRequest, TransportResponse};
pub use types::*;
pub use validation::{decode_payload, parse_response, validate_response};

#[cfg(feature = "isahc-transport")]
pub use transport::IsahcTransport;
