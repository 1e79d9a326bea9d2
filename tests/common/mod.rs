//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use forward_proxy::config::{ListenerConfig, ProxyConfig};
use forward_proxy::http::framer::{read_message, read_to_close};
use forward_proxy::lifecycle::Shutdown;
use forward_proxy::net::listener::Listener;
use forward_proxy::{ProxyServer, ProxyState};

/// A proxy running on an ephemeral port for the duration of a test.
///
/// Holds the shutdown handle so the accept loop stays alive.
pub struct TestProxy {
    pub addr: SocketAddr,
    pub state: ProxyState,
    _shutdown: Shutdown,
}

/// Start the proxy with the given configuration on an ephemeral port.
pub async fn start_proxy(config: ProxyConfig) -> TestProxy {
    let listener_config = ListenerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
    };
    let listener = Listener::bind(&listener_config).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = ProxyServer::new(&config);
    let state = server.state();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestProxy {
        addr,
        state,
        _shutdown: shutdown,
    }
}

/// A scripted mock origin.
///
/// Serves the given responses to consecutive connections, recording each
/// request it receives. The connection is closed after every response, the
/// proxy's response delimiter.
pub struct MockOrigin {
    pub addr: SocketAddr,
    pub requests: mpsc::UnboundedReceiver<Vec<u8>>,
}

pub async fn start_origin(responses: Vec<Vec<u8>>) -> MockOrigin {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, requests) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for response in responses {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let request = read_message(&mut socket).await.unwrap_or_default();
            let _ = tx.send(request);
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
        }
    });

    MockOrigin { addr, requests }
}

/// Open one client connection, send the raw request, and read the reply to
/// connection close.
pub async fn send_request(proxy: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(proxy).await.unwrap();
    stream.write_all(request).await.unwrap();
    read_to_close(&mut stream).await.unwrap()
}

/// Send a control command through the proxy and return the raw reply.
pub async fn send_control(proxy: SocketAddr, path: &str) -> Vec<u8> {
    let request =
        format!("GET http://control.invalid:1{path} HTTP/1.0\r\nHost: control.invalid:1\r\n\r\n");
    send_request(proxy, request.as_bytes()).await
}
