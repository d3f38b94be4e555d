//! Query Parameter Construction
//!
//! Merges the fixed `display_proxies` query, a typed [`ProxyScrapeQuery`] and
//! free-form overrides into one flat, ordered parameter set. Later sources
//! replace earlier keys in place: base < typed query < overrides.

use crate::core::types::ProxyScrapeQuery;
use url::Url;

/// Fixed parameters sent with every list request
pub const BASE_QUERY: [(&str, &str); 3] = [
    ("request", "display_proxies"),
    ("proxy_format", "protocolipport"),
    ("format", "json"),
];

/// A single parameter value before serialization
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<QueryValue>),
}

impl QueryValue {
    /// Serialized form, or `None` when the key should be omitted
    ///
    /// # Formatting
    /// - List → elements joined with `,` (omitted when empty)
    /// - Bool → `"true"` / `"false"`
    /// - Everything else → natural string form
    pub fn format(&self) -> Option<String> {
        match self {
            QueryValue::List(items) if items.is_empty() => None,
            QueryValue::List(items) => Some(
                items
                    .iter()
                    .map(QueryValue::format_item)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            other => Some(other.format_item()),
        }
    }

    fn format_item(&self) -> String {
        match self {
            QueryValue::Str(s) => s.clone(),
            QueryValue::Int(i) => i.to_string(),
            QueryValue::Float(f) => f.to_string(),
            QueryValue::Bool(b) => b.to_string(),
            QueryValue::List(items) => items
                .iter()
                .map(QueryValue::format_item)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Int(value.into())
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        QueryValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Flat, ordered key→string parameter set with replace-in-place semantics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`, keeping the original position on replace
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Apply a formatted value; omitted values leave any existing key as is
    pub fn append(&mut self, key: &str, value: Option<&QueryValue>) {
        if let Some(formatted) = value.and_then(QueryValue::format) {
            self.set(key, formatted);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append all pairs to `url` as an encoded query string
    pub fn apply_to(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            return;
        }
        url.query_pairs_mut().extend_pairs(self.iter());
    }
}

/// Project the typed query onto `(key, value)` entries in a stable order
///
/// Absent filters map to `None` so they are skipped by [`QueryParams::append`].
pub fn query_entries(query: &ProxyScrapeQuery) -> Vec<(&'static str, Option<QueryValue>)> {
    vec![
        ("protocol", list_value(&query.protocol)),
        ("country", list_value(&query.country)),
        ("ssl", query.ssl.map(QueryValue::from)),
        ("anonymity", list_value(&query.anonymity)),
        ("limit", query.limit.map(QueryValue::from)),
        ("skip", query.skip.map(QueryValue::from)),
        ("timeout", query.timeout.map(QueryValue::from)),
    ]
}

fn list_value(values: &[String]) -> Option<QueryValue> {
    Some(QueryValue::from(values.to_vec()))
}

/// Build the full parameter set for a list request
///
/// # Arguments
/// * `query` - Typed filters, applied over [`BASE_QUERY`]
/// * `overrides` - Raw parameters applied last; they win over everything
pub fn build_params(query: Option<&ProxyScrapeQuery>, overrides: &[(String, QueryValue)]) -> QueryParams {
    let mut params = QueryParams::new();
    for (key, value) in BASE_QUERY {
        params.set(key, value);
    }

    if let Some(query) = query {
        for (key, value) in query_entries(query) {
            params.append(key, value.as_ref());
        }
    }

    for (key, value) in overrides {
        params.append(key, Some(value));
    }

    params
}
