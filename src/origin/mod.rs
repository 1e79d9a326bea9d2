//! Origin-facing exchanges.
//!
//! # Data Flow
//! ```text
//! Valid request → canonical bytes (http::wire)
//!     → cache miss / caching off: exchange.rs forward()
//!     → cache hit:                exchange.rs revalidate()
//! Both open one fresh TCP connection to host:port, send, read to close.
//! ```
//!
//! The exchange runs inside the client's own task; a slow origin stalls only
//! that client. No timeout is imposed and no retry is attempted.

pub mod exchange;

pub use exchange::{forward, revalidate, OriginError};
