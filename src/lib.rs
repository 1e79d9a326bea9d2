//! Caching HTTP/1.0 Forward Proxy
//!
//! A forwarding proxy that sits between a single client and arbitrary origin
//! servers. Each client connection carries exactly one HTTP/1.0 GET request,
//! which is either answered directly (control commands, blocked hosts),
//! answered from the response cache after revalidating with the origin, or
//! forwarded to the origin and relayed back.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                FORWARD PROXY                 │
//!                    │                                              │
//!  Client Request    │  ┌─────────┐    ┌─────────┐   ┌──────────┐  │
//!  ──────────────────┼─▶│   net   │───▶│  http   │──▶│ control  │  │
//!                    │  │listener │    │ framer/ │   │dispatcher│  │
//!                    │  └─────────┘    │ parser  │   └────┬─────┘  │
//!                    │                 └────┬────┘        │        │
//!                    │                      │        ┌────▼─────┐  │
//!                    │                      │        │ security │  │
//!                    │                      │        │blocklist │  │
//!                    │                      ▼        └──────────┘  │
//!  Client Response   │  ┌─────────┐    ┌─────────┐                 │
//!  ◀─────────────────┼──│  cache  │◀──▶│ origin  │◀────────────────┼── Origin
//!                    │  │  store  │    │exchange │                 │   Server
//!                    │  └─────────┘    └─────────┘                 │
//!                    │                                              │
//!                    │  config · lifecycle · observability          │
//!                    └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod origin;

// Proxy policy
pub mod cache;
pub mod control;
pub mod security;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use http::server::{ProxyServer, ProxyState};
pub use lifecycle::Shutdown;
