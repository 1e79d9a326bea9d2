//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → framer.rs (accumulate one message, end-of-headers rule)
//!     → request.rs (parse into ParsedRequest, consulting control + blocklist)
//!     → [cache lookup / origin exchange decided by server.rs]
//!     → wire.rs (canonical outbound request = cache key)
//!     → response.rs (status-only replies)
//!     → Send to client, close
//! ```

pub mod framer;
pub mod request;
pub mod response;
pub mod server;
pub mod wire;

pub use request::{HeaderMap, ParsedRequest, RequestParts};
pub use server::{ProxyServer, ProxyState};
