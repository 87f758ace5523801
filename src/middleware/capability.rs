//! Logger capabilities.
//!
//! Every logger records completed requests. A logger may additionally record
//! handler panics and report on slow requests; it advertises those extras by
//! overriding [`RequestLogger::failure_logger`] and
//! [`RequestLogger::slow_logger`]. The answers are collected once when the
//! handler is wrapped and never asked again.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::middleware::entry::{LogEntry, RequestHead};

/// Records completed requests.
pub trait RequestLogger: Send + Sync + 'static {
    fn log_request(&self, entry: LogEntry);

    /// Panic recording, if supported.
    fn failure_logger(self: Arc<Self>) -> Option<Arc<dyn FailureLogger>> {
        None
    }

    /// Slow request reporting, if supported.
    fn slow_logger(self: Arc<Self>) -> Option<Arc<dyn SlowRequestLogger>> {
        None
    }
}

/// Records requests whose handler panicked.
///
/// When a logger has this capability the panic is absorbed after logging.
pub trait FailureLogger: Send + Sync {
    fn log_failure(&self, entry: LogEntry, failure: Failure);
}

/// Reports on requests that are still running.
pub trait SlowRequestLogger: Send + Sync {
    /// How long a request may run before it is reported.
    /// `Duration::ZERO` disables reporting for this request.
    fn cutoff(&self, req: &RequestHead) -> Duration;

    /// Keep reporting every `cutoff` rather than only once.
    fn repeat(&self, req: &RequestHead) -> bool;

    /// `index` counts reports for this request, starting at 0.
    fn log_slow(&self, entry: LogEntry, index: usize);
}

/// Panic payload recovered from a handler.
pub struct Failure {
    payload: Box<dyn Any + Send>,
}

impl Failure {
    pub fn new(payload: Box<dyn Any + Send>) -> Self {
        Self { payload }
    }

    /// Panic message for `&str` and `String` payloads.
    pub fn message(&self) -> Option<&str> {
        if let Some(s) = self.payload.downcast_ref::<&'static str>() {
            Some(*s)
        } else {
            self.payload.downcast_ref::<String>().map(String::as_str)
        }
    }

    pub fn payload(&self) -> &(dyn Any + Send) {
        &*self.payload
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(msg) => f.debug_tuple("Failure").field(&msg).finish(),
            None => f.debug_tuple("Failure").field(&"<non-string payload>").finish(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().unwrap_or("<non-string panic payload>"))
    }
}

/// Capabilities resolved from one logger.
pub(crate) struct Capabilities {
    pub logger: Arc<dyn RequestLogger>,
    pub failure: Option<Arc<dyn FailureLogger>>,
    pub slow: Option<Arc<dyn SlowRequestLogger>>,
}

impl Capabilities {
    pub fn resolve<L: RequestLogger>(logger: Arc<L>) -> Self {
        let failure = Arc::clone(&logger).failure_logger();
        let slow = Arc::clone(&logger).slow_logger();

        tracing::debug!(
            failures = failure.is_some(),
            slow_requests = slow.is_some(),
            "Resolved request logger capabilities"
        );

        Self { logger, failure, slow }
    }
}
