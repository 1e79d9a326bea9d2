//! Response cache subsystem.
//!
//! # Data Flow
//! ```text
//! Canonical outbound request bytes (the key)
//!     → store.rs lookup
//!     → hit: origin::revalidate (If-Modified-Since round trip)
//!     → miss: origin::forward, then store unless the reply is a 404
//! ```
//!
//! Entries live until explicitly flushed or overwritten; there is no TTL,
//! size bound, or eviction.

pub mod store;

pub use store::CacheStore;
