//! Response payload validation
//!
//! The only structural guarantee enforced on upstream data is that `proxies`
//! is present and array-typed. Anything else is left to serde defaults.

use crate::core::error::ProxyScrapeError;
use crate::core::types::ProxyScrapeResponse;
use serde_json::Value;

/// Accept `payload` iff it is an object whose `proxies` field is an array
///
/// # Returns
/// * `Ok(payload)` - Unchanged payload (an empty array is valid)
/// * `Err(MalformedResponse)` - Carries the original payload for inspection
pub fn validate_response(payload: Value) -> Result<Value, ProxyScrapeError> {
    let has_proxy_array = payload
        .get("proxies")
        .map(Value::is_array)
        .unwrap_or(false);

    if has_proxy_array {
        Ok(payload)
    } else {
        Err(ProxyScrapeError::MalformedResponse { payload })
    }
}

/// Decode a response body into JSON
///
/// A body that is not JSON at all is reported as malformed with the body
/// text as a JSON string payload.
pub fn decode_payload(body: &[u8]) -> Result<Value, ProxyScrapeError> {
    serde_json::from_slice(body).map_err(|_| ProxyScrapeError::MalformedResponse {
        payload: Value::String(String::from_utf8_lossy(body).into_owned()),
    })
}

/// Validate then decode into the typed envelope
pub fn parse_response(payload: Value) -> Result<ProxyScrapeResponse, ProxyScrapeError> {
    let payload = validate_response(payload)?;
    Ok(serde_json::from_value(payload)?)
}
