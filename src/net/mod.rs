//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, sequential accept loop)
//!     → connection.rs (id allocation, active-count tracking)
//!     → Hand off to the per-connection pipeline in http::server
//! ```
//!
//! # Design Decisions
//! - The accept loop is sequential and unbounded: every accepted connection
//!   is spawned onto its own task with no admission control
//! - Connection tracking is for tracing and metrics only, never backpressure

pub mod connection;
pub mod listener;
