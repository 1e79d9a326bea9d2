//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse CLI → load config → init logging/metrics → bind → run
//!
//! Shutdown:
//!     SIGINT (signals.rs) → Shutdown::trigger (shutdown.rs)
//!     → accept loop stops → process exits without draining
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
