//! HTTP request logging middleware.
//!
//! Wraps a [`Handler`] so that every request it serves produces exactly one
//! [`LogEntry`] for a pluggable [`RequestLogger`], with optional panic
//! capture and periodic reports for requests that are still running.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod middleware;
pub mod observability;

pub use config::ServerConfig;
pub use crate::http::{BufferedResponse, Handler, HttpServer, ResponseWriter};
pub use lifecycle::Shutdown;
pub use middleware::{
    wrap, Failure, FailureLogger, LogEntry, LogHandler, RequestHead, RequestLogger,
    SlowRequestLogger,
};
pub use observability::TracingLogger;
