use super::ClientConfig;
use std::collections::HashMap;

pub use crate::core::client::{DEFAULT_ENDPOINT as DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            upstream_proxy: None,
            headers: HashMap::new(),
        }
    }
}
