//! Log sanitization utilities
//!
//! Keeps reseller passwords out of debug logs and caps the size of logged
//! response bodies.

use crate::traits::WireParams;

/// Maximum number of bytes of a response body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Request parameters whose values are never logged.
const SECRET_KEYS: &[&str] = &["PW", "pw", "password"];

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Render request parameters as `key=value` pairs with secrets masked.
pub fn redact_params(params: &WireParams) -> String {
    params
        .iter()
        .map(|(k, v)| {
            if SECRET_KEYS.contains(&k.as_str()) {
                format!("{k}=***")
            } else {
                format!("{k}={v}")
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
