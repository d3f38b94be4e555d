/*!
Tests for proxy target parsing and protocol normalization.
*/

use crate::common::sample_proxy;
use proxyscrape::core::target::{normalize_protocol, parse_proxy_target, ProxyCheckTarget, ProxyEndpoint};

fn parse(address: &str) -> Option<ProxyEndpoint> {
    parse_proxy_target(&ProxyCheckTarget::from(address))
}

#[test]
fn test_bare_address_defaults_to_http() {
    assert_eq!(
        parse("10.0.0.1:8080"),
        Some(ProxyEndpoint {
            host: "10.0.0.1".to_string(),
            port: 8080,
            protocol: "http".to_string(),
        })
    );
}

#[test]
fn test_scheme_is_kept() {
    let endpoint = parse("socks5://10.0.0.1:1080").unwrap();
    assert_eq!(endpoint.protocol, "socks5");
    assert_eq!(endpoint.host, "10.0.0.1");
    assert_eq!(endpoint.port, 1080);

    let endpoint = parse("HTTPS://proxy.example.com:8443").unwrap();
    assert_eq!(endpoint.protocol, "https");
    assert_eq!(endpoint.host, "proxy.example.com");
}

#[test]
fn test_unparseable_addresses() {
    assert_eq!(parse("not a url"), None);
    // Host without a port
    assert_eq!(parse("invalid-proxy"), None);
    assert_eq!(parse("http://10.0.0.1"), None);
    // Scheme-default port is dropped by the URL parser
    assert_eq!(parse("http://10.0.0.1:80"), None);
    assert_eq!(parse(""), None);
}

#[test]
fn test_structured_target() {
    let target = ProxyCheckTarget::Endpoint {
        ip: "192.0.2.10".to_string(),
        port: 3128,
        protocol: None,
    };
    assert_eq!(
        parse_proxy_target(&target),
        Some(ProxyEndpoint {
            host: "192.0.2.10".to_string(),
            port: 3128,
            protocol: "http".to_string(),
        })
    );

    let target = ProxyCheckTarget::Endpoint {
        ip: "192.0.2.10".to_string(),
        port: 1080,
        protocol: Some("SOCKS4".to_string()),
    };
    assert_eq!(parse_proxy_target(&target).unwrap().protocol, "socks4");
}

#[test]
fn test_target_from_record() {
    let record = sample_proxy();
    let endpoint = parse_proxy_target(&ProxyCheckTarget::from(&record)).unwrap();

    assert_eq!(endpoint.host, record.ip);
    assert_eq!(endpoint.port, record.port);
    assert_eq!(endpoint.protocol, "http");
    assert_eq!(endpoint.to_url(), "http://127.0.0.1:3128");
}

#[test]
fn test_normalize_protocol() {
    assert_eq!(normalize_protocol("http"), "http");
    assert_eq!(normalize_protocol("SOCKS5"), "socks5");
    assert_eq!(normalize_protocol("https:"), "https");
    assert_eq!(normalize_protocol("socks4://"), "socks4");
}
