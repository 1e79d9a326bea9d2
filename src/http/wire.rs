//! Canonical outbound request construction.
//!
//! # Responsibilities
//! - Build the exact byte sequence sent to origins, which doubles as the
//!   cache key
//! - Build the conditional request used for revalidation
//! - Extract the `Date:` header value from a stored response
//!
//! # Design Decisions
//! - There is exactly one builder for outbound requests; cache keys are never
//!   hand-assembled elsewhere, so two logically equal requests with different
//!   header content or order get different keys by construction
//! - Client `Connection` headers are rewritten to `Connection: close` in
//!   place; if the client sent none, one is appended after the last header

use crate::http::request::HeaderMap;

/// Build the canonical outbound GET request for `host:port` and `path`.
///
/// The returned bytes are both the wire request and the cache key.
pub fn build_get_request(host: &str, port: u16, path: &str, headers: &HeaderMap) -> Vec<u8> {
    let mut request = Vec::new();
    request.extend_from_slice(format!("GET {path} HTTP/1.0\r\nHost: {host}:{port}\r\n").as_bytes());

    let mut connection_seen = false;
    for (name, value) in headers.iter() {
        if name == "Connection" {
            connection_seen = true;
            request.extend_from_slice(b"Connection: close\r\n");
        } else {
            request.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
        }
    }

    if !connection_seen {
        request.extend_from_slice(b"Connection: close\r\n");
    }
    request.extend_from_slice(b"\r\n");
    request
}

/// Build a revalidation request: identical to the canonical request except
/// the header set is exactly one `If-Modified-Since` header.
pub fn build_conditional_request(host: &str, port: u16, path: &str, date: &str) -> Vec<u8> {
    let mut headers = HeaderMap::new();
    headers.insert("If-Modified-Since", date);
    build_get_request(host, port, path, &headers)
}

/// Extract the `Date:` header value from a raw response.
///
/// Takes the text between the first `Date:` marker and the next CRLF, with
/// surrounding whitespace trimmed.
pub fn extract_date(response: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(response);
    let start = text.find("Date:")? + "Date:".len();
    let rest = &text[start..];
    let end = rest.find("\r\n").unwrap_or(rest.len());
    Some(rest[..end].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_connection_close_when_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("Host", "ignored.example:80");
        let request = build_get_request("example.com", 8000, "/index.html", &headers);
        assert_eq!(
            request,
            b"GET /index.html HTTP/1.0\r\nHost: example.com:8000\r\nHost: ignored.example:80\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn rewrites_client_connection_header_in_place() {
        let mut headers = HeaderMap::new();
        headers.insert("Connection", "keep-alive");
        headers.insert("Accept", "*/*");
        let request = build_get_request("example.com", 80, "/", &headers);
        assert_eq!(
            request,
            b"GET / HTTP/1.0\r\nHost: example.com:80\r\nConnection: close\r\nAccept: */*\r\n\r\n"
        );
    }

    #[test]
    fn header_order_changes_the_key() {
        let mut first = HeaderMap::new();
        first.insert("A", "1");
        first.insert("B", "2");
        let mut second = HeaderMap::new();
        second.insert("B", "2");
        second.insert("A", "1");

        assert_ne!(
            build_get_request("h", 80, "/", &first),
            build_get_request("h", 80, "/", &second)
        );
    }

    #[test]
    fn conditional_request_has_single_header() {
        let request =
            build_conditional_request("example.com", 80, "/", "Mon, 01 Jan 2024 00:00:00 GMT");
        assert_eq!(
            request,
            b"GET / HTTP/1.0\r\nHost: example.com:80\r\nIf-Modified-Since: Mon, 01 Jan 2024 00:00:00 GMT\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn extracts_date_value() {
        let response =
            b"HTTP/1.0 200 OK\r\nDate: Mon, 01 Jan 2024 00:00:00 GMT\r\nServer: test\r\n\r\nbody";
        assert_eq!(
            extract_date(response).as_deref(),
            Some("Mon, 01 Jan 2024 00:00:00 GMT")
        );
    }

    #[test]
    fn missing_date_is_none() {
        assert_eq!(extract_date(b"HTTP/1.0 200 OK\r\n\r\n"), None);
    }
}
