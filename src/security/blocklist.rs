//! Host blocklist.
//!
//! # Responsibilities
//! - Hold the mutable set of host:port substring tokens
//! - Answer membership queries against a resolved host:port
//!
//! Membership is deliberately loose: a request is blocked when its resolved
//! `host:port` string contains any stored token as a substring.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashSet;

use crate::config::BlocklistConfig;

/// A thread-safe blocklist shared by every connection task.
#[derive(Clone, Default)]
pub struct Blocklist {
    entries: Arc<DashSet<String>>,
    enabled: Arc<AtomicBool>,
}

impl Blocklist {
    /// Create a new empty, disabled blocklist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a blocklist seeded from startup configuration.
    pub fn from_config(config: &BlocklistConfig) -> Self {
        let blocklist = Self::new();
        blocklist.set_enabled(config.enabled);
        for token in &config.entries {
            blocklist.add(token.clone());
        }
        blocklist
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn add(&self, token: impl Into<String>) {
        self.entries.insert(token.into());
    }

    /// Remove a token; removing a non-member is a no-op.
    pub fn remove(&self, token: &str) {
        self.entries.remove(token);
    }

    pub fn flush(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the resolved `host:port` matches the blocklist.
    ///
    /// Always `false` while the blocklist is disabled.
    pub fn is_blocked(&self, host_port: &str) -> bool {
        if !self.enabled() {
            return false;
        }
        self.entries
            .iter()
            .any(|token| host_port.contains(token.key().as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_semantics() {
        let blocklist = Blocklist::new();
        blocklist.set_enabled(true);
        blocklist.add("example.com:80");

        assert!(blocklist.is_blocked("example.com:80"));
        assert!(blocklist.is_blocked("www.example.com:8080"));
        assert!(!blocklist.is_blocked("example.com:8"));
        assert!(!blocklist.is_blocked("example.org:80"));
    }

    #[test]
    fn disabled_blocklist_matches_nothing() {
        let blocklist = Blocklist::new();
        blocklist.add("example.com:80");
        assert!(!blocklist.is_blocked("example.com:80"));
    }

    #[test]
    fn remove_is_idempotent() {
        let blocklist = Blocklist::new();
        blocklist.add("example.com:80");
        blocklist.remove("example.com:80");
        blocklist.remove("example.com:80");
        assert!(blocklist.is_empty());
    }

    #[test]
    fn seeded_from_config() {
        let config = BlocklistConfig {
            enabled: true,
            entries: vec!["one.example:80".to_string(), "two.example:80".to_string()],
        };
        let blocklist = Blocklist::from_config(&config);
        assert!(blocklist.enabled());
        assert_eq!(blocklist.len(), 2);
        assert!(blocklist.is_blocked("one.example:80"));
    }
}
