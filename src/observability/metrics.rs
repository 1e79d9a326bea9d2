//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): completed requests by outcome
//! - `proxy_cache_lookups_total` (counter): cache lookups by hit/miss
//! - `proxy_cache_entries` (gauge): current cache entry count
//! - `proxy_revalidations_total` (counter): revalidation round trips by result
//! - `proxy_blocked_total` (counter): requests rejected by the blocklist
//! - `proxy_control_commands_total` (counter): control-interface commands
//! - `proxy_active_connections` (gauge): in-flight client connections
//!
//! # Design Decisions
//! - Helpers go through the `metrics` facade, so they are no-ops until an
//!   exporter is installed

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

pub fn record_request(outcome: &'static str) {
    counter!("proxy_requests_total", "outcome" => outcome).increment(1);
}

pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("proxy_cache_lookups_total", "result" => result).increment(1);
}

pub fn record_cache_entries(count: usize) {
    gauge!("proxy_cache_entries").set(count as f64);
}

pub fn record_revalidation(result: &'static str) {
    counter!("proxy_revalidations_total", "result" => result).increment(1);
}

pub fn record_blocked() {
    counter!("proxy_blocked_total").increment(1);
}

pub fn record_control_command() {
    counter!("proxy_control_commands_total").increment(1);
}

pub fn record_active_connections(count: u64) {
    gauge!("proxy_active_connections").set(count as f64);
}
