//! Proxy liveness checks
//!
//! A proxy is live when a request routed through it reaches a public IP echo
//! service and the echoed egress IP equals the proxy's declared host. Every
//! failure collapses to `false`.

use crate::core::debug_logger::DebugLogger;
use crate::core::target::{parse_proxy_target, ProxyCheckTarget};
use crate::core::transport::{HttpTransport, TransportRequest};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Public IP echo endpoint
pub const IP_ECHO_ENDPOINT: &str = "https://api.ipify.org";
/// Fixed timeout for a single liveness check
pub const CHECK_PROXY_TIMEOUT_MS: u64 = 7_000;

/// Extract the echoed IP from an echo service body
///
/// Supports `{"ip": "1.2.3.4"}`, a JSON string `"1.2.3.4"` and a bare
/// `1.2.3.4` text body.
pub fn extract_echoed_ip(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(obj)) => obj.get("ip").and_then(Value::as_str).map(str::to_string),
        Ok(Value::String(ip)) => Some(ip),
        Ok(_) => None,
        Err(_) => {
            let text = std::str::from_utf8(body).ok()?.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
    }
}

/// Check whether `target` routes traffic with its declared IP
///
/// Makes no network call when the target cannot be parsed.
pub async fn check_proxy(
    transport: &dyn HttpTransport,
    target: &ProxyCheckTarget,
    logger: &DebugLogger,
) -> bool {
    let endpoint = match parse_proxy_target(target) {
        Some(endpoint) => endpoint,
        None => {
            logger.check_result(&format!("{:?}", target), false, "unparseable_target", None);
            return false;
        }
    };

    let correlation_id = logger.new_correlation_id();
    logger.check_start(&endpoint.to_url(), CHECK_PROXY_TIMEOUT_MS, correlation_id.clone());

    let mut headers = HashMap::new();
    headers.insert("accept".to_string(), "application/json".to_string());

    let request = TransportRequest {
        url: IP_ECHO_ENDPOINT.to_string(),
        timeout: Duration::from_millis(CHECK_PROXY_TIMEOUT_MS),
        headers,
        proxy: Some(endpoint.clone()),
    };

    let response = match transport.get(request).await {
        Ok(response) => response,
        Err(e) => {
            logger.check_result(&endpoint.to_url(), false, &e.to_string(), Some(correlation_id));
            return false;
        }
    };

    if !response.is_success() {
        let reason = format!("http_{}", response.status_code);
        logger.check_result(&endpoint.to_url(), false, &reason, Some(correlation_id));
        return false;
    }

    let live = extract_echoed_ip(&response.body)
        .map(|ip| ip == endpoint.host)
        .unwrap_or(false);

    let reason = if live { "ip_match" } else { "ip_mismatch" };
    logger.check_result(&endpoint.to_url(), live, reason, Some(correlation_id));
    live
}
