/*!
ProxyScrape list client.

[`ProxyScrapeClient`] issues a single GET against the free proxy list
endpoint, validates the payload shape and offers ranking and liveness helpers
on top of it.

## Configuration layering

Request settings resolve most-specific first:

1. per-call [`FetchOptions`] (`timeout_ms`, then `request_config`)
2. client-level [`RequestConfig`]
3. client default timeout / [`DEFAULT_TIMEOUT_MS`]

## Dependencies

- `url`: endpoint parsing and query encoding
- `tokio` / `tokio-util`: cancellation of the in-flight request
- `serde_json`: payload decoding
*/

use crate::config::ClientConfig;
use crate::core::debug_logger::DebugLogger;
use crate::core::error::ProxyScrapeError;
use crate::core::liveness;
use crate::core::params::{build_params, QueryValue};
use crate::core::ranking::{rank_proxies, DEFAULT_BEST_COUNT};
use crate::core::target::ProxyCheckTarget;
use crate::core::transport::{HttpTransport, RequestConfig, TransportRequest};
use crate::core::types::{ProxyRecord, ProxyScrapeQuery, ProxyScrapeResponse};
use crate::core::validation::{decode_payload, parse_response};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use url::Url;

#[cfg(feature = "isahc-transport")]
use crate::core::transport::IsahcTransport;

/// Free proxy list endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.proxyscrape.com/v4/free-proxy-list/get";
/// Default request timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Lower bound for any resolved timeout; curl treats zero as "wait forever"
pub const MIN_TIMEOUT_MS: u64 = 1;

/// Per-call options for [`ProxyScrapeClient::fetch_proxy_list`]
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub query: Option<ProxyScrapeQuery>,
    /// Raw parameters applied after the typed query
    pub params: Vec<(String, QueryValue)>,
    /// Aborts the in-flight request when cancelled
    pub cancel: Option<CancellationToken>,
    pub timeout_ms: Option<u64>,
    pub request_config: Option<RequestConfig>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: ProxyScrapeQuery) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_request_config(mut self, config: RequestConfig) -> Self {
        self.request_config = Some(config);
        self
    }
}

/// Client for the ProxyScrape free proxy list API
///
/// Holds only immutable configuration plus a shared transport, so it is
/// cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct ProxyScrapeClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    timeout_ms: u64,
    request_config: RequestConfig,
    logger: Arc<DebugLogger>,
}

impl std::fmt::Debug for ProxyScrapeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyScrapeClient")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("request_config", &self.request_config)
            .finish()
    }
}

impl ProxyScrapeClient {
    /// Create a client backed by the default isahc transport
    ///
    /// # Errors
    ///
    /// Returns `ProxyScrapeError::Transport` if the HTTP client cannot be created.
    #[cfg(feature = "isahc-transport")]
    pub fn new() -> Result<Self, ProxyScrapeError> {
        Ok(Self::with_transport(Arc::new(IsahcTransport::new()?)))
    }

    /// Create a client over a caller-supplied transport
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            request_config: default_request_config(),
            logger: Arc::new(DebugLogger::from_env()),
        }
    }

    /// Build from a loaded [`ClientConfig`] using the default transport
    #[cfg(feature = "isahc-transport")]
    pub fn from_config(config: &ClientConfig) -> Result<Self, ProxyScrapeError> {
        Ok(Self::new()?.configure(config))
    }

    /// Apply a loaded [`ClientConfig`] to this client
    pub fn configure(self, config: &ClientConfig) -> Self {
        self.with_base_url(config.base_url.clone())
            .with_timeout_ms(config.timeout_ms)
            .with_request_config(config.request_config())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Client-level request configuration, layered over the library defaults
    pub fn with_request_config(mut self, config: RequestConfig) -> Self {
        self.request_config = default_request_config().merged_with(&config);
        self
    }

    pub fn with_logger(mut self, logger: DebugLogger) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve the effective request for one call
    fn build_request(&self, options: &FetchOptions) -> Result<TransportRequest, ProxyScrapeError> {
        let base = RequestConfig {
            timeout_ms: Some(self.timeout_ms),
            ..Default::default()
        }
        .merged_with(&self.request_config);

        let call_config = options.request_config.clone().unwrap_or_default();
        let merged = base.merged_with(&call_config);

        let timeout_ms = options
            .timeout_ms
            .or(call_config.timeout_ms)
            .or(base.timeout_ms)
            .unwrap_or(DEFAULT_TIMEOUT_MS)
            .max(MIN_TIMEOUT_MS);

        let mut url = Url::parse(&self.base_url)?;
        build_params(options.query.as_ref(), &options.params).apply_to(&mut url);

        Ok(TransportRequest {
            url: url.to_string(),
            timeout: Duration::from_millis(timeout_ms),
            headers: merged.headers,
            proxy: merged.proxy,
        })
    }

    /// Fetch one page of the proxy list
    ///
    /// # Errors
    ///
    /// - `MalformedResponse` if the payload has no `proxies` array
    /// - `Status` for a non-2xx response
    /// - `Transport` for connection, DNS or timeout failures (never retried)
    /// - `Cancelled` if `options.cancel` fires before the response arrives
    pub async fn fetch_proxy_list(&self, options: FetchOptions) -> Result<ProxyScrapeResponse, ProxyScrapeError> {
        let request = self.build_request(&options)?;
        let correlation_id = self.logger.new_correlation_id();
        let timeout_ms = request.timeout.as_millis() as u64;
        self.logger.fetch_start(&request.url, timeout_ms, correlation_id.clone());

        let start = Instant::now();
        let in_flight = self.transport.get(request);

        let outcome = match &options.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    self.logger.fetch_failed("cancelled", correlation_id);
                    return Err(ProxyScrapeError::Cancelled);
                }
                result = in_flight => result,
            },
            None => in_flight.await,
        };

        let response = outcome.map_err(|e| {
            self.logger.fetch_failed(&e.to_string(), correlation_id.clone());
            ProxyScrapeError::from(e)
        })?;

        if !response.is_success() {
            self.logger.fetch_failed(&format!("HTTP {}", response.status_code), correlation_id);
            return Err(ProxyScrapeError::Status {
                status: response.status_code,
                body: response.text(),
            });
        }

        let parsed = decode_payload(&response.body).and_then(parse_response);
        match parsed {
            Ok(list) => {
                self.logger.fetch_end(
                    response.status_code,
                    list.proxies.len(),
                    start.elapsed().as_millis() as u64,
                    correlation_id,
                );
                Ok(list)
            }
            Err(err) => {
                match err.payload() {
                    Some(payload) => self.logger.malformed_response(payload, correlation_id),
                    None => self.logger.fetch_failed(&err.to_string(), correlation_id),
                }
                Err(err)
            }
        }
    }

    /// Fetch with typed filters only
    pub async fn get_proxy_list(&self, query: ProxyScrapeQuery) -> Result<ProxyScrapeResponse, ProxyScrapeError> {
        self.fetch_proxy_list(FetchOptions::new().with_query(query)).await
    }

    /// Fetch, then return up to `count` live proxies in ranking order
    ///
    /// See [`rank_proxies`](crate::core::ranking::rank_proxies) for the order.
    pub async fn get_best_proxies(
        &self,
        query: ProxyScrapeQuery,
        count: Option<usize>,
    ) -> Result<Vec<ProxyRecord>, ProxyScrapeError> {
        let list = self.get_proxy_list(query).await?;
        Ok(rank_proxies(&list.proxies, count.unwrap_or(DEFAULT_BEST_COUNT)))
    }

    /// Live-test one proxy through this client's transport
    ///
    /// Never errors; every failure mode yields `false`.
    pub async fn check_proxy(&self, target: impl Into<ProxyCheckTarget>) -> bool {
        let target = target.into();
        liveness::check_proxy(self.transport.as_ref(), &target, &self.logger).await
    }
}

fn default_request_config() -> RequestConfig {
    RequestConfig::default()
        .with_header("Accept", "application/json")
        .with_header("User-Agent", format!("proxyscrape-rs/{}", env!("CARGO_PKG_VERSION")))
}
