//! Per-request orchestration.
//!
//! # Lifecycle
//! ```text
//! Created:    interceptor + start time
//! Polling:    slow capability and cutoff > 0 → spawn poller
//! Completing: cancel poller → snapshot → one terminal event
//!     handler returned              → log_request
//!     handler panicked + capability → log_failure, panic absorbed
//!     handler panicked, no capability → no event, panic resumes
//!     request future dropped        → log_request with progress so far
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use futures_util::FutureExt;
use http::Request;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::http::handler::Handler;
use crate::http::response::ResponseWriter;
use crate::middleware::capability::{Capabilities, Failure, RequestLogger};
use crate::middleware::entry::{LogEntry, RequestHead, RequestStart};
use crate::middleware::interceptor::{Progress, ResponseInterceptor};
use crate::middleware::poller::SlowRequestPoller;

/// Wrap `next` so that every request it serves is reported to `logger`.
///
/// `logger` is always told about completed requests. If it also records
/// failures, panics from `next` are caught and logged instead of
/// propagating. If it also reports slow requests, a poller runs alongside
/// each request that has a non-zero cutoff.
pub fn wrap<H, L>(next: H, logger: Arc<L>) -> LogHandler<H>
where
    H: Handler,
    L: RequestLogger,
{
    LogHandler {
        next,
        caps: Capabilities::resolve(logger),
    }
}

/// Handler produced by [`wrap`].
pub struct LogHandler<H> {
    next: H,
    caps: Capabilities,
}

impl<H> LogHandler<H> {
    /// Whether panics from the wrapped handler are caught and logged.
    pub fn logs_failures(&self) -> bool {
        self.caps.failure.is_some()
    }

    /// Whether slow requests are reported.
    pub fn logs_slow_requests(&self) -> bool {
        self.caps.slow.is_some()
    }

    /// Start the slow request poller if this request wants one.
    ///
    /// The returned guard cancels the poller when dropped.
    fn start_poller(
        &self,
        request: &Arc<RequestHead>,
        progress: &Arc<Progress>,
        start: RequestStart,
    ) -> Option<DropGuard> {
        let slow = self.caps.slow.as_ref()?;
        let cutoff = slow.cutoff(request);
        if cutoff.is_zero() {
            return None;
        }
        let repeat = slow.repeat(request);

        let cancel = CancellationToken::new();
        SlowRequestPoller::new(
            cutoff,
            repeat,
            Arc::clone(request),
            Arc::clone(progress),
            start,
            Arc::clone(slow),
        )
        .spawn(cancel.clone());

        Some(cancel.drop_guard())
    }
}

/// Owns everything needed to emit a request's terminal event.
///
/// If the request future is dropped before the handler returns, `Drop`
/// stops the poller and reports what was written so far via `log_request`.
struct Completion {
    logger: Arc<dyn RequestLogger>,
    request: Arc<RequestHead>,
    progress: Arc<Progress>,
    start: RequestStart,
    poller: Option<DropGuard>,
    armed: bool,
}

impl Completion {
    /// Stop the poller and take the final entry. Disarms the guard.
    fn finish(&mut self) -> LogEntry {
        self.armed = false;
        // Cancel before the final snapshot so no slow report follows it.
        drop(self.poller.take());
        LogEntry::new(Arc::clone(&self.request), self.progress.snapshot(), self.start)
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let entry = self.finish();
        tracing::debug!(uri = %entry.request.uri, "Request dropped before handler returned");
        self.logger.log_request(entry);
    }
}

#[async_trait]
impl<H: Handler> Handler for LogHandler<H> {
    async fn serve(&self, req: Request<Body>, res: &mut dyn ResponseWriter) {
        let request = Arc::new(RequestHead::from_request(&req));
        let progress = Arc::new(Progress::new());
        let start = RequestStart::now();

        let mut completion = Completion {
            logger: Arc::clone(&self.caps.logger),
            poller: self.start_poller(&request, &progress, start),
            request,
            progress: Arc::clone(&progress),
            start,
            armed: true,
        };

        let outcome = {
            let mut interceptor = ResponseInterceptor::new(&mut *res, progress);
            AssertUnwindSafe(self.next.serve(req, &mut interceptor))
                .catch_unwind()
                .await
        };

        let entry = completion.finish().with_response_headers(res.headers());

        match outcome {
            Ok(()) => self.caps.logger.log_request(entry),
            Err(payload) => match &self.caps.failure {
                Some(failure_logger) => failure_logger.log_failure(entry, Failure::new(payload)),
                None => panic::resume_unwind(payload),
            },
        }
    }
}
