//! Per-client admission control for upstream calls.
//!
//! A fixed-window counter: each client may trigger `max_requests` upstream
//! calls per window. The window restarts on the first request after it
//! lapses, so a client can land up to twice the ceiling across a boundary.
//!
//! Clients are identified by a forwarded-address header, which callers can
//! set to anything they like. This bounds spend from honest browsers, not
//! from a determined abuser.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod limiter;
mod models;

pub use limiter::{Admission, RateLimiter};
pub use models::RateRecord;

use axum::http::HeaderMap;

/// Identity used when the header is absent or blank.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// First comma-separated entry of `header`, trimmed.
pub fn client_identity(headers: &HeaderMap, header: &str) -> String {
    headers
        .get(header)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static(" 203.0.113.7 , 10.0.0.1"),
        );
        assert_eq!(client_identity(&headers, "x-forwarded-for"), "203.0.113.7");
    }

    #[test]
    fn test_missing_header_is_unknown() {
        let headers = HeaderMap::new();
        assert_eq!(client_identity(&headers, "x-forwarded-for"), UNKNOWN_CLIENT);
    }

    #[test]
    fn test_blank_header_is_unknown() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(" , 10.0.0.1"));
        assert_eq!(client_identity(&headers, "x-forwarded-for"), UNKNOWN_CLIENT);
    }

    #[test]
    fn test_custom_header_name() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_identity(&headers, "x-real-ip"), "198.51.100.2");
        assert_eq!(client_identity(&headers, "x-forwarded-for"), UNKNOWN_CLIENT);
    }
}
