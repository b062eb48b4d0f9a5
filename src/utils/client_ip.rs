//! Client IP extraction from HTTP request headers.

use axum::http::HeaderMap;
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Determines the client IP for a request.
///
/// Precedence:
/// 1. First entry of `X-Forwarded-For`
/// 2. `X-Real-Ip`
/// 3. The peer socket address
///
/// Empty or non-UTF-8 header values are skipped. Header values are not
/// checked for IP syntax.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(client_ip(&headers, None).as_deref(), Some("203.0.113.7"));
/// ```
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    if let Some(forwarded) = header_str(headers, X_FORWARDED_FOR)
        && let Some(first) = forwarded.split(',').next().map(str::trim)
        && !first.is_empty()
    {
        return Some(first.to_string());
    }

    if let Some(real_ip) = header_str(headers, X_REAL_IP) {
        return Some(real_ip.to_string());
    }

    peer.map(|addr| addr.ip().to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
