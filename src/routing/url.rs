//! Request URL construction.
//!
//! # Responsibilities
//! - Join a base URL and a request path
//! - Honour absolute paths as a full override of the base
//! - Append the serialized query parameters
//!
//! # Design Decisions
//! - Params are a key-ordered JSON map, so serialization is deterministic
//! - Nested values use bracket notation (`a[b]=1`, `a[0]=1`)
//! - `null` serializes as an empty value, empty containers are omitted
//! - Keys and values are percent-encoded per RFC 3986 (space is `%20`)
//! - Integral floats print without a fraction (`1.0` becomes `1`)

use serde_json::Value;
use url::form_urlencoded;

use crate::error::{RequestError, RequestResult};

/// Query parameters attached to a request.
pub type Params = serde_json::Map<String, Value>;

/// Combine base URL, path and query parameters into the request URL.
pub fn build_url(base: &str, path: &str, params: &Params) -> RequestResult<String> {
    if path.is_empty() {
        return Err(RequestError::InvalidPath);
    }

    let base = base.strip_suffix('/').unwrap_or(base);

    let mut url = if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    };

    let query = encode_query(params);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    Ok(url)
}

/// Serialize params into a percent-encoded query string.
pub fn encode_query(params: &Params) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten(key.clone(), value, &mut pairs);
    }

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-encode everything but the RFC 3986 unreserved set.
fn encode_component(input: &str) -> String {
    // The form serializer differs from RFC 3986 on exactly three characters.
    form_urlencoded::byte_serialize(input.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}

fn format_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() => f.to_string(),
        _ => n.to_string(),
    }
}

fn flatten(prefix: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => out.push((prefix, String::new())),
        Value::Bool(b) => out.push((prefix, b.to_string())),
        Value::Number(n) => out.push((prefix, format_number(n))),
        Value::String(s) => out.push((prefix, s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(format!("{}[{}]", prefix, i), item, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                flatten(format!("{}[{}]", prefix, key), item, out);
            }
        }
    }
}
