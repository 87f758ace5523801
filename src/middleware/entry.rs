//! Log entries handed to request loggers.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use http::{HeaderMap, Method, Request, StatusCode, Uri, Version};
use tokio::time::Instant;

use crate::http::request::X_REQUEST_ID;
use crate::middleware::interceptor::Snapshot;

/// Owned copy of the parts of a request that loggers may inspect.
///
/// Taken before the handler consumes the request so that the slow request
/// poller can keep reporting on it.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub method: Method,
    pub uri: Uri,
    pub version: Version,
    pub headers: HeaderMap,
}

impl RequestHead {
    pub fn from_request<B>(req: &Request<B>) -> Self {
        Self {
            method: req.method().clone(),
            uri: req.uri().clone(),
            version: req.version(),
            headers: req.headers().clone(),
        }
    }

    /// Value of the `x-request-id` header, if present and valid UTF-8.
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
    }
}

/// When a request started, on both the wall clock and the monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct RequestStart {
    pub wall: SystemTime,
    pub instant: Instant,
}

impl RequestStart {
    pub fn now() -> Self {
        Self {
            wall: SystemTime::now(),
            instant: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.instant.elapsed()
    }
}

/// Point-in-time view of a request, built fresh for every emission.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// The request being served.
    pub request: Arc<RequestHead>,

    /// First status written by the handler; `None` if it never set one.
    pub status: Option<StatusCode>,

    /// Wall-clock time the request started.
    pub started_at: SystemTime,

    /// Time between request start and this emission.
    pub elapsed: Duration,

    /// Body bytes written so far.
    pub bytes_written: u64,

    /// Response headers as the handler left them.
    ///
    /// Only set on the terminal entry of a request that ran to completion or
    /// panicked; slow reports and abandoned requests carry `None`.
    pub response_headers: Option<HeaderMap>,
}

impl LogEntry {
    pub(crate) fn new(request: Arc<RequestHead>, snapshot: Snapshot, start: RequestStart) -> Self {
        Self {
            request,
            status: snapshot.status,
            started_at: start.wall,
            elapsed: start.elapsed(),
            bytes_written: snapshot.bytes_written,
            response_headers: None,
        }
    }

    pub(crate) fn with_response_headers(mut self, headers: &HeaderMap) -> Self {
        self.response_headers = Some(headers.clone());
        self
    }

    /// Status as an integer, `0` when unset.
    pub fn status_code(&self) -> u16 {
        self.status.map_or(0, |s| s.as_u16())
    }
}
