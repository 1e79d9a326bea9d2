//! OS signal handling.
//!
//! # Responsibilities
//! - Translate SIGINT (Ctrl+C) into the internal shutdown signal
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - The interrupt terminates the process promptly: the accept loop stops
//!   and in-flight connections are dropped with the runtime

use crate::lifecycle::Shutdown;

/// Spawn a task that triggers shutdown on the first interrupt.
pub fn listen(shutdown: Shutdown) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            return;
        }
        tracing::info!("Interrupt received");
        shutdown.trigger();
    });
}
