/*!
Tests for live proxy ranking.
*/

use crate::common::{ranked_fixture, sample_proxy, sample_response};
use proxyscrape::core::ranking::{compare_proxies, rank_proxies, select_best, DEFAULT_BEST_COUNT};
use proxyscrape::core::types::ProxyRecord;
use std::cmp::Ordering;

#[test]
fn test_rank_drops_dead_and_orders_by_uptime() {
    let ranked = rank_proxies(&ranked_fixture(), DEFAULT_BEST_COUNT);

    assert_eq!(ranked.len(), 10);
    assert!(ranked.iter().all(|p| p.alive));
    assert_eq!(ranked.first().unwrap().ip, "10.0.0.12"); // index 11
    assert_eq!(ranked.last().unwrap().ip, "10.0.0.2"); // index 1
    assert!(ranked.windows(2).all(|w| w[0].uptime > w[1].uptime));
    assert!(!ranked.iter().any(|p| p.ip == "10.0.0.1" || p.ip == "10.0.0.7"));
}

#[test]
fn test_rank_respects_count() {
    let ranked = rank_proxies(&ranked_fixture(), 3);
    let ips: Vec<&str> = ranked.iter().map(|p| p.ip.as_str()).collect();
    assert_eq!(ips, ["10.0.0.12", "10.0.0.11", "10.0.0.10"]);

    assert_eq!(rank_proxies(&ranked_fixture(), 50).len(), 10);
    assert!(rank_proxies(&ranked_fixture(), 0).is_empty());
}

#[test]
fn test_rank_with_nothing_alive() {
    let dead: Vec<ProxyRecord> = ranked_fixture()
        .into_iter()
        .map(|p| ProxyRecord { alive: false, ..p })
        .collect();

    assert!(rank_proxies(&dead, DEFAULT_BEST_COUNT).is_empty());
    assert!(rank_proxies(&[], DEFAULT_BEST_COUNT).is_empty());
}

#[test]
fn test_tie_breaks() {
    let base = sample_proxy();
    let slow = ProxyRecord { ip: "slow".into(), average_timeout: 300.0, ..base.clone() };
    let fast = ProxyRecord { ip: "fast".into(), average_timeout: 100.0, ..base.clone() };
    assert_eq!(compare_proxies(&fast, &slow), Ordering::Less);

    let late = ProxyRecord { ip: "late".into(), timeout: 900.0, ..base.clone() };
    let early = ProxyRecord { ip: "early".into(), timeout: 90.0, ..base.clone() };
    assert_eq!(compare_proxies(&early, &late), Ordering::Less);

    let ranked = rank_proxies(&[slow, late, fast, early], 10);
    let ips: Vec<&str> = ranked.iter().map(|p| p.ip.as_str()).collect();
    assert_eq!(ips, ["fast", "early", "late", "slow"]);
}

#[test]
fn test_full_ties_keep_input_order() {
    let base = sample_proxy();
    let first = ProxyRecord { ip: "first".into(), ..base.clone() };
    let second = ProxyRecord { ip: "second".into(), ..base };

    let ranked = rank_proxies(&[first, second], 10);
    assert_eq!(ranked[0].ip, "first");
    assert_eq!(ranked[1].ip, "second");
}

#[test]
fn test_select_best_from_response() {
    let response = sample_response(ranked_fixture());
    let best = select_best(&response, 2);
    assert_eq!(best.len(), 2);
    assert_eq!(best[0].uptime, 61.0);
}
