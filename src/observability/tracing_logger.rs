//! Request logger backed by `tracing`.
//!
//! Completed requests are logged at INFO, panics at ERROR and slow requests
//! at WARN, each with method, URI, status, elapsed time, bytes written and
//! request ID as structured fields.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{ObservabilityConfig, SlowRequestConfig};
use crate::middleware::{
    Failure, FailureLogger, LogEntry, RequestHead, RequestLogger, SlowRequestLogger,
};

#[derive(Debug, Clone)]
pub struct TracingLogger {
    slow: SlowRequestConfig,
    log_failures: bool,
}

impl TracingLogger {
    pub fn new(slow: SlowRequestConfig, log_failures: bool) -> Self {
        Self { slow, log_failures }
    }

    pub fn from_config(slow: &SlowRequestConfig, observability: &ObservabilityConfig) -> Self {
        Self::new(*slow, observability.log_failures)
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(SlowRequestConfig::default(), true)
    }
}

impl RequestLogger for TracingLogger {
    fn log_request(&self, entry: LogEntry) {
        tracing::info!(
            method = %entry.request.method,
            uri = %entry.request.uri,
            status = entry.status_code(),
            elapsed = ?entry.elapsed,
            bytes_written = entry.bytes_written,
            request_id = entry.request.request_id().unwrap_or("-"),
            "Request completed"
        );
    }

    fn failure_logger(self: Arc<Self>) -> Option<Arc<dyn FailureLogger>> {
        if self.log_failures {
            Some(self)
        } else {
            None
        }
    }

    fn slow_logger(self: Arc<Self>) -> Option<Arc<dyn SlowRequestLogger>> {
        Some(self)
    }
}

impl FailureLogger for TracingLogger {
    fn log_failure(&self, entry: LogEntry, failure: Failure) {
        tracing::error!(
            method = %entry.request.method,
            uri = %entry.request.uri,
            status = entry.status_code(),
            elapsed = ?entry.elapsed,
            bytes_written = entry.bytes_written,
            request_id = entry.request.request_id().unwrap_or("-"),
            panic = %failure,
            "Request handler panicked"
        );
    }
}

impl SlowRequestLogger for TracingLogger {
    fn cutoff(&self, _req: &RequestHead) -> Duration {
        self.slow.cutoff()
    }

    fn repeat(&self, _req: &RequestHead) -> bool {
        self.slow.repeat
    }

    fn log_slow(&self, entry: LogEntry, index: usize) {
        tracing::warn!(
            method = %entry.request.method,
            uri = %entry.request.uri,
            status = entry.status_code(),
            elapsed = ?entry.elapsed,
            bytes_written = entry.bytes_written,
            request_id = entry.request.request_id().unwrap_or("-"),
            slow = index,
            "Request still running"
        );
    }
}
