//! Client for the ProxyScrape free proxy list API.
//!
//! ```no_run
//! use proxyscrape::core::{ProxyScrapeClient, ProxyScrapeQuery, protocol};
//!
//! # async fn run() -> Result<(), proxyscrape::core::ProxyScrapeError> {
//! let client = ProxyScrapeClient::new()?;
//! let best = client
//!     .get_best_proxies(ProxyScrapeQuery::new().protocol(protocol::HTTP).country("US"), Some(5))
//!     .await?;
//!
//! if let Some(top) = best.first() {
//!     println!("{} live: {}", top.proxy, client.check_proxy(top).await);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod core;

pub use crate::config::{ClientConfig, ConfigError};
pub use crate::core::{
    FetchOptions, HttpTransport, ProxyRecord, ProxyScrapeClient, ProxyScrapeError,
    ProxyScrapeQuery, ProxyScrapeResponse,
};
