//! Slow request reporting.
//!
//! # Responsibilities
//! - Wake every `cutoff` while a request is in flight
//! - Snapshot the request's progress and hand it to the slow logger
//! - Stop as soon as the dispatcher cancels it
//!
//! # Design Decisions
//! - Ticks are scheduled from the request start, so reports do not drift
//! - A report that overruns the cutoff pushes the next one back a full cutoff
//! - Cancellation is checked before each tick; a report already being
//!   emitted when cancellation lands is allowed to finish

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::middleware::capability::SlowRequestLogger;
use crate::middleware::entry::{LogEntry, RequestHead, RequestStart};
use crate::middleware::interceptor::Progress;

/// Background reporter for one in-flight request.
pub struct SlowRequestPoller {
    cutoff: Duration,
    repeat: bool,
    request: Arc<RequestHead>,
    progress: Arc<Progress>,
    start: RequestStart,
    sink: Arc<dyn SlowRequestLogger>,
}

impl SlowRequestPoller {
    pub fn new(
        cutoff: Duration,
        repeat: bool,
        request: Arc<RequestHead>,
        progress: Arc<Progress>,
        start: RequestStart,
        sink: Arc<dyn SlowRequestLogger>,
    ) -> Self {
        Self {
            cutoff,
            repeat,
            request,
            progress,
            start,
            sink,
        }
    }

    /// Run on the current runtime until `cancel` fires.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }

    pub async fn run(self, cancel: CancellationToken) {
        if self.cutoff.is_zero() {
            return;
        }

        tracing::trace!(
            cutoff = ?self.cutoff,
            repeat = self.repeat,
            uri = %self.request.uri,
            "Slow request poller started"
        );

        let Some(first) = self.start.instant.checked_add(self.cutoff) else {
            // Cutoff beyond the representable future: nothing will ever be due.
            cancel.cancelled().await;
            return;
        };
        let mut ticker = time::interval_at(first, self.cutoff);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut index = 0;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let entry = LogEntry::new(
                        Arc::clone(&self.request),
                        self.progress.snapshot(),
                        self.start,
                    );
                    self.sink.log_slow(entry, index);
                    index += 1;
                }
            }

            if !self.repeat {
                break;
            }
        }

        tracing::trace!(reports = index, uri = %self.request.uri, "Slow request poller stopped");
    }
}
