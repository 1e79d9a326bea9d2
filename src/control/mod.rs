//! Control interface dispatcher.
//!
//! # Responsibilities
//! - Recognize the reserved `/proxy/...` request paths
//! - Apply the corresponding cache/blocklist mutation
//!
//! # Design Decisions
//! - Dispatch happens inside the parser, after all syntax validation and
//!   before the blocklist check, so commands are never blockable
//! - Removing an absent blocklist token is a no-op, not an error

use crate::http::server::ProxyState;
use crate::observability::metrics;

const BLOCKLIST_ADD_PREFIX: &str = "/proxy/blocklist/add/";
const BLOCKLIST_REMOVE_PREFIX: &str = "/proxy/blocklist/remove/";

/// Recognize `path` as a control command and apply its side effect.
///
/// Returns `true` when the path was a command; `false` lets the caller
/// continue to blocklist and forwarding logic.
pub fn try_handle(path: &str, state: &ProxyState) -> bool {
    match path {
        "/proxy/cache/enable" => state.cache.set_enabled(true),
        "/proxy/cache/disable" => state.cache.set_enabled(false),
        "/proxy/cache/flush" => state.cache.flush(),
        "/proxy/blocklist/enable" => state.blocklist.set_enabled(true),
        "/proxy/blocklist/disable" => state.blocklist.set_enabled(false),
        "/proxy/blocklist/flush" => state.blocklist.flush(),
        _ => {
            if let Some(token) = path.strip_prefix(BLOCKLIST_ADD_PREFIX) {
                state.blocklist.add(token);
            } else if let Some(token) = path.strip_prefix(BLOCKLIST_REMOVE_PREFIX) {
                state.blocklist.remove(token);
            } else {
                return false;
            }
        }
    }

    tracing::info!(path, "Control command applied");
    metrics::record_control_command();
    true
}
