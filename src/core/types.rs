// Core types for the ProxyScrape free proxy list API
use serde::{Deserialize, Serialize};

/// Protocol values accepted and returned by the API
///
/// The upstream API is the source of truth for valid values, so these are
/// plain string constants and any other string is passed through verbatim.
pub mod protocol {
    pub const HTTP: &str = "http";
    pub const HTTPS: &str = "https";
    pub const SOCKS4: &str = "socks4";
    pub const SOCKS5: &str = "socks5";
}

/// Anonymity tiers assigned by the API
pub mod anonymity {
    pub const TRANSPARENT: &str = "transparent";
    pub const ANONYMOUS: &str = "anonymous";
    pub const ELITE: &str = "elite";
}

/// Geolocation and network metadata attached to each proxy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxyIpData {
    /// Autonomous system, e.g. "AS13335 Cloudflare, Inc."
    #[serde(rename = "as", deserialize_with = "lenient::or_default")]
    pub as_name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub asname: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub city: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub continent: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub continent_code: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub country: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub country_code: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub district: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub hosting: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub isp: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub lon: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub mobile: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub org: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub proxy: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub region_name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub status: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub timezone: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub zip: String,
}

/// Observed state of a single proxy as reported by the API
///
/// Missing or `null` fields decode to their defaults, and counters accept
/// integral floats, so one sparse record never rejects an otherwise valid
/// list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyRecord {
    #[serde(deserialize_with = "lenient::or_default")]
    pub alive: bool,
    /// Unix timestamp (seconds) since the proxy was last seen alive
    #[serde(deserialize_with = "lenient::or_default")]
    pub alive_since: f64,
    /// One of [`anonymity`], passed through as received
    #[serde(deserialize_with = "lenient::or_default")]
    pub anonymity: String,
    /// Average response time in milliseconds
    #[serde(deserialize_with = "lenient::or_default")]
    pub average_timeout: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub first_seen: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub ip_data: ProxyIpData,
    #[serde(deserialize_with = "lenient::or_default")]
    pub ip_data_last_update: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub last_seen: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub port: u16,
    /// One of [`protocol`], passed through as received
    #[serde(deserialize_with = "lenient::or_default")]
    pub protocol: String,
    /// Full `protocol://ip:port` address
    #[serde(deserialize_with = "lenient::or_default")]
    pub proxy: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub ssl: bool,
    /// Last measured response time in milliseconds
    #[serde(deserialize_with = "lenient::or_default")]
    pub timeout: f64,
    #[serde(deserialize_with = "lenient::count")]
    pub times_alive: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub times_dead: u64,
    /// Uptime percentage (0-100)
    #[serde(deserialize_with = "lenient::or_default")]
    pub uptime: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub ip: String,
}

/// Pagination cursor; the API has returned all of these shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NextPage {
    Flag(bool),
    Page(serde_json::Number),
    Token(String),
}

/// Envelope returned by `display_proxies`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProxyScrapeResponse {
    #[serde(default, deserialize_with = "lenient::count")]
    pub shown_records: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_records: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub limit: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub skip: u64,
    #[serde(default)]
    pub nextpage: Option<NextPage>,
    pub proxies: Vec<ProxyRecord>,
}

/// Field decoders for upstream data that is looser than its documented shape
mod lenient {
    use serde::{Deserialize, Deserializer};

    /// `null` decodes as the type's default
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// Non-negative counter sent as an integer, an integral float or `null`
    pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<serde_json::Number>::deserialize(deserializer)? {
            None => Ok(0),
            Some(n) => Ok(n
                .as_u64()
                .or_else(|| n.as_f64().map(|f| f as u64))
                .unwrap_or(0)),
        }
    }
}

/// Typed filters for a proxy list request
///
/// Multi-valued filters are serialized comma-joined; an empty list sends no
/// filter at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProxyScrapeQuery {
    pub protocol: Vec<String>,
    pub country: Vec<String>,
    pub ssl: Option<bool>,
    pub anonymity: Vec<String>,
    pub limit: Option<u32>,
    pub skip: Option<u32>,
    /// Maximum proxy timeout in milliseconds
    pub timeout: Option<u32>,
}

impl ProxyScrapeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol.push(protocol.into());
        self
    }

    pub fn protocols<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protocol.extend(protocols.into_iter().map(Into::into));
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country.push(country.into());
        self
    }

    pub fn countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.country.extend(countries.into_iter().map(Into::into));
        self
    }

    pub fn anonymity(mut self, anonymity: impl Into<String>) -> Self {
        self.anonymity.push(anonymity.into());
        self
    }

    pub fn anonymities<I, S>(mut self, anonymities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.anonymity.extend(anonymities.into_iter().map(Into::into));
        self
    }

    pub fn ssl(mut self, ssl: bool) -> Self {
        self.ssl = Some(ssl);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout = Some(timeout_ms);
        self
    }
}
