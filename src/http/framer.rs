//! Message framing over a byte stream.
//!
//! # Responsibilities
//! - Accumulate one HTTP-style message: reads stop at the blank line that
//!   terminates the header block, or when the peer closes
//! - Accumulate a full origin reply: reads stop only when the peer closes
//!
//! # Design Decisions
//! - Client requests use the end-of-headers rule; a GET request has no body
//!   to lose, and bytes past the terminator that arrived in the same read are
//!   kept as-is
//! - Origin replies are read to connection close instead: every outbound
//!   request forces `Connection: close`, so the close is a reliable response
//!   delimiter and bodies arriving after the header terminator are never
//!   truncated

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

const READ_CHUNK: usize = 1024;
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Read one message from the stream, stopping once the accumulated buffer
/// ends with the header terminator or the peer closes.
pub async fn read_message<R>(stream: &mut R) -> io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut message = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        message.extend_from_slice(&chunk[..n]);
        if message.ends_with(HEADER_TERMINATOR) {
            break;
        }
    }

    Ok(message)
}

/// Read from the stream until the peer closes, returning everything received.
pub async fn read_to_close<R>(stream: &mut R) -> io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut message = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        message.extend_from_slice(&chunk[..n]);
    }

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn stops_at_header_terminator() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        client
            .write_all(b"GET http://example.com/ HTTP/1.0\r\n\r\n")
            .await
            .unwrap();

        let message = read_message(&mut server).await.unwrap();
        assert_eq!(message, b"GET http://example.com/ HTTP/1.0\r\n\r\n");
    }

    #[tokio::test]
    async fn accumulates_across_reads() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        let reader = tokio::spawn(async move { read_message(&mut server).await.unwrap() });

        client.write_all(b"GET http://example.com/ HTTP/1.0\r\n").await.unwrap();
        client.flush().await.unwrap();
        tokio::task::yield_now().await;
        client.write_all(b"Host: example.com\r\n\r\n").await.unwrap();

        let message = reader.await.unwrap();
        assert_eq!(
            message,
            b"GET http://example.com/ HTTP/1.0\r\nHost: example.com\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn stops_on_peer_close() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        client.write_all(b"partial request with no termin").await.unwrap();
        drop(client);

        let message = read_message(&mut server).await.unwrap();
        assert_eq!(message, b"partial request with no termin");
    }

    #[tokio::test]
    async fn read_to_close_captures_late_body() {
        let (mut origin, mut proxy) = tokio::io::duplex(4096);
        let reader = tokio::spawn(async move { read_to_close(&mut proxy).await.unwrap() });

        origin
            .write_all(b"HTTP/1.0 200 OK\r\nContent-Length: 4\r\n\r\n")
            .await
            .unwrap();
        origin.flush().await.unwrap();
        tokio::task::yield_now().await;
        origin.write_all(b"body").await.unwrap();
        drop(origin);

        let reply = reader.await.unwrap();
        assert!(reply.ends_with(b"body"));
    }
}
