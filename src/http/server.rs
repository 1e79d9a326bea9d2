//! Proxy server and per-connection pipeline.
//!
//! # Responsibilities
//! - Hold the process-wide shared state (cache store, blocklist)
//! - Run the sequential accept loop, spawning one task per connection
//! - Drive each connection through frame → parse → respond → close
//!
//! # Design Decisions
//! - Exactly one request per connection; the client socket is closed
//!   unconditionally after the response write, whichever branch ran
//! - An origin failure closes the client abruptly, with no status line
//! - No admission control: concurrency is bounded only by the OS

use std::net::SocketAddr;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::broadcast;

use crate::cache::CacheStore;
use crate::config::ProxyConfig;
use crate::http::framer::read_message;
use crate::http::request::{parse_request, ParsedRequest, RequestParts};
use crate::http::response;
use crate::http::wire::build_get_request;
use crate::net::connection::{ConnectionGuard, ConnectionId, ConnectionTracker};
use crate::net::listener::{Listener, ListenerError};
use crate::observability::metrics;
use crate::origin;
use crate::security::Blocklist;

/// Process-wide mutable state shared by every connection task.
///
/// Each structure synchronizes its own reads and writes; races between
/// concurrent control commands and cache writes resolve last-write-wins.
#[derive(Clone, Default)]
pub struct ProxyState {
    pub cache: CacheStore,
    pub blocklist: Blocklist,
}

impl ProxyState {
    pub fn from_config(config: &ProxyConfig) -> Self {
        Self {
            cache: CacheStore::from_config(&config.cache),
            blocklist: Blocklist::from_config(&config.blocklist),
        }
    }
}

/// The forward proxy server.
pub struct ProxyServer {
    state: ProxyState,
    tracker: ConnectionTracker,
}

impl ProxyServer {
    /// Create a server with state seeded from configuration.
    pub fn new(config: &ProxyConfig) -> Self {
        Self {
            state: ProxyState::from_config(config),
            tracker: ConnectionTracker::new(),
        }
    }

    /// Handle to the shared state (used by tests and diagnostics).
    pub fn state(&self) -> ProxyState {
        self.state.clone()
    }

    /// Accept connections until the shutdown signal fires.
    ///
    /// Each accepted connection runs on its own task; shutdown stops the
    /// accept loop immediately without draining in-flight connections.
    pub async fn run(
        self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ListenerError> {
        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer_addr) = accepted?;
                    let state = self.state.clone();
                    let guard = self.tracker.track();
                    tokio::spawn(async move {
                        handle_connection(stream, peer_addr, state, guard).await;
                    });
                }
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, closing listener");
                    break;
                }
            }
        }
        Ok(())
    }
}

/// One pipeline pass for one client connection.
async fn handle_connection(
    mut stream: TcpStream,
    peer_addr: SocketAddr,
    state: ProxyState,
    guard: ConnectionGuard,
) {
    let connection_id = guard.id();

    let request = match read_message(&mut stream).await {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(connection_id = %connection_id, peer_addr = %peer_addr, error = %e, "Failed to read request");
            return;
        }
    };

    let outcome = match parse_request(&request, &state) {
        ParsedRequest::BadRequest => {
            send_status(&mut stream, response::BAD_REQUEST, connection_id).await;
            "bad_request"
        }
        ParsedRequest::NotImplemented => {
            send_status(&mut stream, response::NOT_IMPLEMENTED, connection_id).await;
            "not_implemented"
        }
        ParsedRequest::ControlHandled => {
            send_status(&mut stream, response::OK, connection_id).await;
            "control"
        }
        ParsedRequest::Blocked => {
            metrics::record_blocked();
            send_status(&mut stream, response::FORBIDDEN, connection_id).await;
            "blocked"
        }
        ParsedRequest::Valid(parts) => {
            match respond_from_origin(&mut stream, &state, &parts, connection_id).await {
                Some(outcome) => outcome,
                None => return,
            }
        }
    };

    metrics::record_request(outcome);
    let _ = stream.shutdown().await;
}

/// Serve a valid request from the cache (after revalidation) or by
/// forwarding. Returns `None` when the origin exchange failed and the client
/// was closed abruptly.
async fn respond_from_origin(
    stream: &mut TcpStream,
    state: &ProxyState,
    parts: &RequestParts,
    connection_id: ConnectionId,
) -> Option<&'static str> {
    let outbound = build_get_request(&parts.host, parts.port, &parts.path, &parts.headers);

    let cached = if state.cache.enabled() {
        let entry = state.cache.get(&outbound);
        metrics::record_cache_lookup(entry.is_some());
        entry
    } else {
        None
    };

    let (result, outcome) = match cached {
        Some(entry) => (
            origin::revalidate(state, parts, &outbound, entry).await,
            "cached",
        ),
        None => (origin::forward(state, parts, &outbound).await, "forwarded"),
    };

    match result {
        Ok(bytes) => {
            tracing::debug!(
                connection_id = %connection_id,
                host = %parts.host,
                port = parts.port,
                bytes = bytes.len(),
                outcome,
                "Relaying origin response"
            );
            if let Err(e) = stream.write_all(&bytes).await {
                tracing::debug!(connection_id = %connection_id, error = %e, "Client write failed");
            }
            Some(outcome)
        }
        Err(e) => {
            tracing::warn!(
                connection_id = %connection_id,
                host = %parts.host,
                port = parts.port,
                error = %e,
                "Origin exchange failed"
            );
            metrics::record_request("origin_error");
            None
        }
    }
}

async fn send_status(stream: &mut TcpStream, status: &[u8], connection_id: ConnectionId) {
    if let Err(e) = response::write_status(stream, status).await {
        tracing::debug!(connection_id = %connection_id, error = %e, "Client write failed");
    }
}
