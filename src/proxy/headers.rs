//! Header utilities for upstream forwarding
//!
//! Hop-by-hop headers are connection-scoped and must not cross the
//! proxy in either direction. `Host` and `Content-Length` are rebuilt
//! by the egress transport for the outbound connection.

use axum::http::header::{self, HeaderName};
use axum::http::HeaderMap;

/// Hop-by-hop headers that must never be forwarded
const HOP_BY_HOP_HEADERS: &[HeaderName] = &[
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Check if a header is a hop-by-hop header that should not be forwarded
pub fn is_hop_by_hop_header(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.contains(name)
}

/// Headers to forward upstream: everything the caller sent minus
/// hop-by-hop headers, `Host`, and `Content-Length`.
///
/// The credential header is copied through here too; the rewriter
/// overwrites it afterwards, so the caller's value never survives.
pub fn forward_request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::new();
    for (name, value) in inbound {
        if is_hop_by_hop_header(name) || name == header::HOST || name == header::CONTENT_LENGTH {
            continue;
        }
        filtered.append(name.clone(), value.clone());
    }
    filtered
}

/// Response headers to relay back to the caller, minus hop-by-hop
/// headers.
pub fn filter_response_headers(response_headers: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::new();
    for (name, value) in response_headers {
        if !is_hop_by_hop_header(name) {
            filtered.append(name.clone(), value.clone());
        }
    }
    filtered
}
