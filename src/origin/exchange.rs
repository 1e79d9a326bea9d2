//! Forwarding and revalidation exchanges.
//!
//! # Responsibilities
//! - Open one connection per outbound request, send the canonical bytes,
//!   read the reply to connection close
//! - Forwarding: store cacheable replies under the canonical key
//! - Revalidation: confirm a cached entry with an If-Modified-Since round
//!   trip before it is served

use std::io;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::http::framer::read_to_close;
use crate::http::request::RequestParts;
use crate::http::server::ProxyState;
use crate::http::wire::{build_conditional_request, extract_date};
use crate::observability::metrics;

const NOT_FOUND_MARKER: &str = "404 Not Found";
const NOT_MODIFIED_MARKER: &str = "304";

/// Errors from talking to an origin server.
///
/// These are never recovered locally: the connection handler logs them and
/// closes the client without a status line.
#[derive(Debug, Error)]
pub enum OriginError {
    /// TCP connection to the origin could not be established.
    #[error("failed to connect to origin {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        source: io::Error,
    },

    /// The connection was reset or failed mid-exchange.
    #[error("origin exchange failed: {0}")]
    Io(#[from] io::Error),
}

/// Forward the canonical request to the origin and return the raw reply.
///
/// When caching is enabled and the reply is not a 404, it is stored under
/// the canonical key, overwriting any prior entry.
pub async fn forward(
    state: &ProxyState,
    parts: &RequestParts,
    request: &[u8],
) -> Result<Vec<u8>, OriginError> {
    let response = exchange(&parts.host, parts.port, request).await?;

    if state.cache.enabled() && !contains(&response, NOT_FOUND_MARKER) {
        state.cache.insert(request.to_vec(), response.clone());
    }

    Ok(response)
}

/// Revalidate a cached entry with the origin and return the bytes to serve.
///
/// Builds a conditional request whose only header is `If-Modified-Since`
/// with the stored entry's `Date:` value. A reply carrying the `304` marker
/// keeps the entry; any other reply replaces it under the same key. The
/// returned bytes are whatever now stands for the key.
pub async fn revalidate(
    state: &ProxyState,
    parts: &RequestParts,
    request: &[u8],
    cached: Vec<u8>,
) -> Result<Vec<u8>, OriginError> {
    // Stored replies carry a Date header from the origin; without one there
    // is nothing to revalidate against.
    let Some(date) = extract_date(&cached) else {
        return Ok(cached);
    };

    let conditional = build_conditional_request(&parts.host, parts.port, &parts.path, &date);
    let reply = exchange(&parts.host, parts.port, &conditional).await?;

    if contains(&reply, NOT_MODIFIED_MARKER) {
        metrics::record_revalidation("not_modified");
        Ok(cached)
    } else {
        metrics::record_revalidation("replaced");
        state.cache.insert(request.to_vec(), reply.clone());
        Ok(reply)
    }
}

/// One use-then-close origin round trip: connect, send, read to close.
async fn exchange(host: &str, port: u16, request: &[u8]) -> Result<Vec<u8>, OriginError> {
    let mut stream =
        TcpStream::connect((host, port))
            .await
            .map_err(|source| OriginError::Connect {
                host: host.to_string(),
                port,
                source,
            })?;

    stream.write_all(request).await?;
    let response = read_to_close(&mut stream).await?;
    Ok(response)
}

fn contains(bytes: &[u8], marker: &str) -> bool {
    String::from_utf8_lossy(bytes).contains(marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::HeaderMap;
    use crate::http::wire::build_get_request;

    fn parts(host: &str, port: u16) -> RequestParts {
        RequestParts {
            host: host.to_string(),
            port,
            path: "/".to_string(),
            headers: HeaderMap::new(),
        }
    }

    #[tokio::test]
    async fn connect_failure_surfaces_and_keeps_entry() {
        let state = ProxyState::default();
        state.cache.set_enabled(true);

        let parts = parts("127.0.0.1", 1); // nothing listens on port 1
        let request = build_get_request(&parts.host, parts.port, &parts.path, &parts.headers);
        let cached = b"HTTP/1.0 200 OK\r\nDate: Mon, 01 Jan 2024 00:00:00 GMT\r\n\r\nold".to_vec();
        state.cache.insert(request.clone(), cached.clone());

        let result = revalidate(&state, &parts, &request, cached.clone()).await;
        assert!(matches!(result, Err(OriginError::Connect { .. })));
        // The entry that existed before the failed attempt remains.
        assert_eq!(state.cache.get(&request), Some(cached));
    }

    #[tokio::test]
    async fn missing_date_serves_entry_without_an_exchange() {
        let state = ProxyState::default();
        let parts = parts("127.0.0.1", 1);
        let request = build_get_request(&parts.host, parts.port, &parts.path, &parts.headers);
        let cached = b"HTTP/1.0 200 OK\r\n\r\nno date".to_vec();

        // Would fail with Connect if it tried the origin.
        let served = revalidate(&state, &parts, &request, cached.clone())
            .await
            .unwrap();
        assert_eq!(served, cached);
    }
}
