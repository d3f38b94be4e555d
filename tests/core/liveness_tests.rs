/*!
Tests for proxy liveness checks.

The echo service is replaced by a scripted transport; every check must
resolve to a boolean regardless of what the transport does.
*/

use crate::common::{sample_proxy, MockTransport};
use proxyscrape::core::debug_logger::DebugLogger;
use proxyscrape::core::error::TransportError;
use proxyscrape::core::liveness::{check_proxy, extract_echoed_ip, CHECK_PROXY_TIMEOUT_MS, IP_ECHO_ENDPOINT};
use proxyscrape::core::target::ProxyCheckTarget;
use proxyscrape::core::ProxyScrapeClient;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_matching_ip_is_live() {
    let transport = MockTransport::new();
    transport.push_json(&json!({ "ip": "127.0.0.1" }));

    let record = sample_proxy();
    let live = check_proxy(&transport, &ProxyCheckTarget::from(&record), &DebugLogger::disabled()).await;
    assert!(live);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.url, IP_ECHO_ENDPOINT);
    assert_eq!(request.timeout, Duration::from_millis(CHECK_PROXY_TIMEOUT_MS));

    let proxy = request.proxy.as_ref().unwrap();
    assert_eq!(proxy.host, record.ip);
    assert_eq!(proxy.port, record.port);
    assert_eq!(proxy.protocol, record.protocol);
}

#[tokio::test]
async fn test_mismatched_ip_is_dead() {
    let transport = MockTransport::new();
    transport.push_json(&json!({ "ip": "203.0.113.1" }));

    let target = ProxyCheckTarget::from(&sample_proxy());
    assert!(!check_proxy(&transport, &target, &DebugLogger::disabled()).await);
}

#[tokio::test]
async fn test_bare_text_echo() {
    let transport = MockTransport::new();
    transport.push_response(200, "10.0.0.1\n");

    let target = ProxyCheckTarget::from("10.0.0.1:8080");
    assert!(check_proxy(&transport, &target, &DebugLogger::disabled()).await);
}

#[tokio::test]
async fn test_transport_error_is_dead() {
    let transport = MockTransport::new();
    transport.push_error(TransportError::Connect("connection refused".to_string()));

    let target = ProxyCheckTarget::from(&sample_proxy());
    assert!(!check_proxy(&transport, &target, &DebugLogger::disabled()).await);
}

#[tokio::test]
async fn test_non_success_status_is_dead() {
    let transport = MockTransport::new();
    transport.push_response(407, "127.0.0.1");

    let target = ProxyCheckTarget::from(&sample_proxy());
    assert!(!check_proxy(&transport, &target, &DebugLogger::disabled()).await);
}

#[tokio::test]
async fn test_unparseable_target_makes_no_request() {
    let transport = MockTransport::new();

    let target = ProxyCheckTarget::from("invalid-proxy");
    assert!(!check_proxy(&transport, &target, &DebugLogger::disabled()).await);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_client_check_uses_injected_transport() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(&json!({ "ip": "127.0.0.1" }));
    transport.push_json(&json!({ "ip": "203.0.113.1" }));

    let client = ProxyScrapeClient::with_transport(transport.clone()).with_logger(DebugLogger::disabled());
    let record = sample_proxy();

    assert!(client.check_proxy(&record).await);
    assert!(!client.check_proxy(&record).await);
    assert!(!client.check_proxy("not a url").await);
    assert_eq!(transport.call_count(), 2);
}

#[test]
fn test_extract_echoed_ip_shapes() {
    assert_eq!(extract_echoed_ip(br#"{"ip":"1.2.3.4"}"#).as_deref(), Some("1.2.3.4"));
    assert_eq!(extract_echoed_ip(br#""1.2.3.4""#).as_deref(), Some("1.2.3.4"));
    assert_eq!(extract_echoed_ip(b"1.2.3.4").as_deref(), Some("1.2.3.4"));
    assert_eq!(extract_echoed_ip(br#"{"origin":"1.2.3.4"}"#), None);
    assert_eq!(extract_echoed_ip(b"   "), None);
}
