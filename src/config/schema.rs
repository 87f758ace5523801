//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the request logger server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Slow request reporting.
    pub slow_requests: SlowRequestConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Slow request reporting configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SlowRequestConfig {
    /// Milliseconds before a request is reported as slow. 0 disables.
    pub cutoff_ms: u64,

    /// Report again every `cutoff_ms` until the request completes.
    pub repeat: bool,
}

impl SlowRequestConfig {
    pub fn cutoff(&self) -> Duration {
        Duration::from_millis(self.cutoff_ms)
    }
}

impl Default for SlowRequestConfig {
    fn default() -> Self {
        Self {
            cutoff_ms: 1_000,
            repeat: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Catch and log handler panics instead of letting them propagate.
    pub log_failures: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_failures: true,
        }
    }
}
