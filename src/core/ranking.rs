//! Proxy ranking
//!
//! Orders live proxies by uptime (desc), average response time (asc) and last
//! response time (asc). Floats are compared with `total_cmp` so the order is
//! total even for NaN.

use crate::core::types::{ProxyRecord, ProxyScrapeResponse};
use std::cmp::Ordering;

/// Default number of proxies returned by best-proxy selection
pub const DEFAULT_BEST_COUNT: usize = 10;

/// Ranking order: higher uptime first, then lower average_timeout, then lower timeout
pub fn compare_proxies(a: &ProxyRecord, b: &ProxyRecord) -> Ordering {
    b.uptime
        .total_cmp(&a.uptime)
        .then_with(|| a.average_timeout.total_cmp(&b.average_timeout))
        .then_with(|| a.timeout.total_cmp(&b.timeout))
}

/// Keep alive proxies, rank them and return at most `count`
///
/// Never fails; returns an empty list when nothing is alive. Full ties keep
/// their input order (stable sort).
pub fn rank_proxies(proxies: &[ProxyRecord], count: usize) -> Vec<ProxyRecord> {
    let mut alive: Vec<ProxyRecord> = proxies.iter().filter(|p| p.alive).cloned().collect();
    alive.sort_by(compare_proxies);
    alive.truncate(count);
    alive
}

/// [`rank_proxies`] over a whole response envelope
pub fn select_best(response: &ProxyScrapeResponse, count: usize) -> Vec<ProxyRecord> {
    rank_proxies(&response.proxies, count)
}
