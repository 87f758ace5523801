//! Response interception.
//!
//! # Responsibilities
//! - Forward status, headers and body to the real response writer
//! - Record the first status set and the running byte count
//! - Expose a consistent snapshot to the poller and the dispatcher
//!
//! # Design Decisions
//! - A single mutex guards status and byte count together
//! - Forwarding happens outside the lock; only the handler writes

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use http::{HeaderMap, StatusCode};

use crate::http::response::ResponseWriter;

/// Status and byte count observed at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub status: Option<StatusCode>,
    pub bytes_written: u64,
}

/// Shared progress counters for one in-flight request.
#[derive(Debug, Default)]
pub struct Progress {
    state: Mutex<Snapshot>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read status and byte count together.
    pub fn snapshot(&self) -> Snapshot {
        *self.lock()
    }

    /// Record `status` unless one was already recorded.
    ///
    /// Returns `true` when this call won.
    fn record_status(&self, status: StatusCode) -> bool {
        let mut state = self.lock();
        if state.status.is_some() {
            return false;
        }
        state.status = Some(status);
        true
    }

    fn record_bytes(&self, n: usize) {
        let mut state = self.lock();
        state.bytes_written = state.bytes_written.saturating_add(n as u64);
    }

    // Nothing panics while the lock is held, so a poisoned state is still valid.
    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Pass-through writer that records what the handler sends.
pub struct ResponseInterceptor<'a, W: ?Sized> {
    inner: &'a mut W,
    progress: Arc<Progress>,
}

impl<'a, W: ResponseWriter + ?Sized> ResponseInterceptor<'a, W> {
    pub fn new(inner: &'a mut W, progress: Arc<Progress>) -> Self {
        Self { inner, progress }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.progress.snapshot()
    }
}

impl<W: ResponseWriter + ?Sized> ResponseWriter for ResponseInterceptor<'_, W> {
    fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    fn write_status(&mut self, status: StatusCode) {
        if self.progress.record_status(status) {
            self.inner.write_status(status);
        }
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.progress.record_bytes(written);
        Ok(written)
    }
}
