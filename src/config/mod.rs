//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared by value into the server at startup
//!
//! CLI flags (-a/-p) override file values after loading.
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; runtime mutation happens only through
//!   the control interface, never through config
//! - All fields have defaults to allow running with no config file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::BlocklistConfig;
pub use schema::CacheConfig;
pub use schema::ListenerConfig;
pub use schema::ProxyConfig;
