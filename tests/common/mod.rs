//! Shared loggers and handlers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Request, StatusCode};

use request_logger::{
    Failure, FailureLogger, Handler, LogEntry, RequestHead, RequestLogger, ResponseWriter,
    SlowRequestLogger,
};

/// Status the test handlers write; outside the registered range on purpose.
pub fn odd_status() -> StatusCode {
    StatusCode::from_u16(999).unwrap()
}

pub fn request(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

/// Logger with every capability, recording what it is given.
#[derive(Default)]
pub struct MockLogger {
    pub cutoff: Duration,
    pub repeat: bool,
    pub capture_failures: bool,
    pub reqs: Mutex<Vec<LogEntry>>,
    pub failures: Mutex<Vec<(LogEntry, Option<String>)>>,
    pub slow: Mutex<Vec<(usize, LogEntry)>>,
}

impl MockLogger {
    pub fn new() -> Self {
        Self {
            capture_failures: true,
            ..Self::default()
        }
    }

    pub fn slow(cutoff: Duration, repeat: bool) -> Self {
        Self {
            cutoff,
            repeat,
            ..Self::new()
        }
    }

    /// Same logger without the failure capability.
    pub fn without_failures(self) -> Self {
        Self {
            capture_failures: false,
            ..self
        }
    }

    pub fn reqs(&self) -> Vec<LogEntry> {
        self.reqs.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<(LogEntry, Option<String>)> {
        self.failures.lock().unwrap().clone()
    }

    pub fn slow_entries(&self) -> Vec<(usize, LogEntry)> {
        self.slow.lock().unwrap().clone()
    }
}

impl RequestLogger for MockLogger {
    fn log_request(&self, entry: LogEntry) {
        self.reqs.lock().unwrap().push(entry);
    }

    fn failure_logger(self: Arc<Self>) -> Option<Arc<dyn FailureLogger>> {
        if self.capture_failures {
            Some(self)
        } else {
            None
        }
    }

    fn slow_logger(self: Arc<Self>) -> Option<Arc<dyn SlowRequestLogger>> {
        Some(self)
    }
}

impl FailureLogger for MockLogger {
    fn log_failure(&self, entry: LogEntry, failure: Failure) {
        let message = failure.message().map(str::to_owned);
        self.failures.lock().unwrap().push((entry, message));
    }
}

impl SlowRequestLogger for MockLogger {
    fn cutoff(&self, _req: &RequestHead) -> Duration {
        self.cutoff
    }

    fn repeat(&self, _req: &RequestHead) -> bool {
        self.repeat
    }

    fn log_slow(&self, entry: LogEntry, index: usize) {
        self.slow.lock().unwrap().push((index, entry));
    }
}

/// Logger with only the mandatory capability.
#[derive(Default)]
pub struct PlainLogger {
    pub reqs: Mutex<Vec<LogEntry>>,
}

impl PlainLogger {
    pub fn count(&self) -> usize {
        self.reqs.lock().unwrap().len()
    }
}

impl RequestLogger for PlainLogger {
    fn log_request(&self, entry: LogEntry) {
        self.reqs.lock().unwrap().push(entry);
    }
}

/// Slow logger whose first report blocks the calling thread for `stall`.
pub struct StallingLogger {
    pub cutoff: Duration,
    pub stall: Duration,
    pub slow: Mutex<Vec<Duration>>,
}

impl StallingLogger {
    pub fn new(cutoff: Duration, stall: Duration) -> Self {
        Self {
            cutoff,
            stall,
            slow: Mutex::new(Vec::new()),
        }
    }

    /// `elapsed` of each slow report, in emission order.
    pub fn elapsed(&self) -> Vec<Duration> {
        self.slow.lock().unwrap().clone()
    }
}

impl RequestLogger for StallingLogger {
    fn log_request(&self, _entry: LogEntry) {}

    fn slow_logger(self: Arc<Self>) -> Option<Arc<dyn SlowRequestLogger>> {
        Some(self)
    }
}

impl SlowRequestLogger for StallingLogger {
    fn cutoff(&self, _req: &RequestHead) -> Duration {
        self.cutoff
    }

    fn repeat(&self, _req: &RequestHead) -> bool {
        true
    }

    fn log_slow(&self, entry: LogEntry, index: usize) {
        self.slow.lock().unwrap().push(entry.elapsed);
        if index == 0 {
            std::thread::sleep(self.stall);
        }
    }
}

/// Sets a content type, then writes a short body.
pub struct HeaderHandler;

#[async_trait]
impl Handler for HeaderHandler {
    async fn serve(&self, _req: Request<Body>, res: &mut dyn ResponseWriter) {
        res.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        res.write_status(StatusCode::OK);
        res.write_all(b"plain").unwrap();
    }
}

/// Writes only a status.
pub struct EmptyHandler;

#[async_trait]
impl Handler for EmptyHandler {
    async fn serve(&self, _req: Request<Body>, res: &mut dyn ResponseWriter) {
        res.write_status(StatusCode::OK);
    }
}

/// Writes `status` then 16 bytes.
pub struct StatusHandler(pub StatusCode);

#[async_trait]
impl Handler for StatusHandler {
    async fn serve(&self, _req: Request<Body>, res: &mut dyn ResponseWriter) {
        res.write_status(self.0);
        res.write_all(&[0; 16]).unwrap();
    }
}

/// Writes `status` and 16 bytes, then panics with "boo!".
pub struct PanicHandler(pub StatusCode);

#[async_trait]
impl Handler for PanicHandler {
    async fn serve(&self, _req: Request<Body>, res: &mut dyn ResponseWriter) {
        res.write_status(self.0);
        res.write_all(&[0; 16]).unwrap();
        panic!("boo!");
    }
}

/// Writes `status` and 8 bytes, sleeps, then writes 8 more bytes.
pub struct SlowHandler {
    pub status: StatusCode,
    pub sleep: Duration,
}

#[async_trait]
impl Handler for SlowHandler {
    async fn serve(&self, _req: Request<Body>, res: &mut dyn ResponseWriter) {
        res.write_status(self.status);
        res.write_all(&[0; 8]).unwrap();
        tokio::time::sleep(self.sleep).await;
        res.write_all(&[0; 8]).unwrap();
    }
}

/// Sleeps, then panics.
pub struct SlowPanicHandler(pub Duration);

#[async_trait]
impl Handler for SlowPanicHandler {
    async fn serve(&self, _req: Request<Body>, _res: &mut dyn ResponseWriter) {
        tokio::time::sleep(self.0).await;
        panic!("late boo!");
    }
}

/// Writes body bytes without ever setting a status.
pub struct NoStatusHandler;

#[async_trait]
impl Handler for NoStatusHandler {
    async fn serve(&self, _req: Request<Body>, res: &mut dyn ResponseWriter) {
        res.write_all(b"implicit").unwrap();
    }
}
