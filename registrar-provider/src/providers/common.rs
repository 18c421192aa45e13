//! Shared provider helpers

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

// ============ HTTP Client ============

/// Default connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client with the default timeouts
pub fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {e}");
            Client::new()
        })
}

// ============ Response tree helpers ============

/// Normalize a scalar-or-list node into a list.
///
/// XML-derived trees hold a single child as a bare value and repeated children
/// as an array. Missing nodes and empty elements yield an empty list.
pub fn one_or_many(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

/// Text of a leaf field; `None` when missing, not a string, or empty.
pub fn text(node: &Value, key: &str) -> Option<String> {
    node.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Text of a leaf field exactly as sent; `None` when missing, not a string, or blank.
pub fn raw_text(node: &Value, key: &str) -> Option<String> {
    node.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Whether a leaf field equals the provider's "true" marker (case-insensitive).
pub fn flag(node: &Value, key: &str, marker: &str) -> bool {
    node.get(key)
        .and_then(Value::as_str)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case(marker))
}

/// Non-empty child section, if present.
pub fn section<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get(key)
        .filter(|v| !matches!(v, Value::Null) && v.as_str() != Some(""))
}

// ============ Domain names ============

/// Trimmed, lower-cased, without a trailing dot.
pub fn normalize_domain_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}
