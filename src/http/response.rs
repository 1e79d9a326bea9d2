//! Status-only client responses.
//!
//! Every directly-answered outcome is a bare HTTP/1.0 status line with no
//! body; relayed and cached origin responses are written verbatim elsewhere.

use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

pub const OK: &[u8] = b"HTTP/1.0 200 OK\r\n\r\n";
pub const BAD_REQUEST: &[u8] = b"HTTP/1.0 400 Bad Request\r\n\r\n";
pub const FORBIDDEN: &[u8] = b"HTTP/1.0 403 Forbidden\r\n\r\n";
pub const NOT_IMPLEMENTED: &[u8] = b"HTTP/1.0 501 Not Implemented\r\n\r\n";

/// Write a status-only response to the client.
pub async fn write_status<W>(stream: &mut W, status: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    stream.write_all(status).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lines_are_bare() {
        for status in [OK, BAD_REQUEST, FORBIDDEN, NOT_IMPLEMENTED] {
            assert!(status.starts_with(b"HTTP/1.0 "));
            assert!(status.ends_with(b"\r\n\r\n"));
        }
    }
}
