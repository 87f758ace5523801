//! Request logging middleware.
//!
//! # Data Flow
//! ```text
//! wrap(handler, logger)
//!     → capability.rs (resolve failure / slow capabilities once)
//!     → LogHandler (dispatcher.rs)
//!
//! Per request:
//!     dispatcher.rs builds ResponseInterceptor (interceptor.rs) + start time
//!     → [slow capability, cutoff > 0] spawn SlowRequestPoller (poller.rs)
//!     → run wrapped handler against the interceptor
//!     → cancel poller → snapshot → exactly one terminal LogEntry (entry.rs)
//!       (also when the request future is dropped mid-flight)
//! ```
//!
//! # Design Decisions
//! - Capabilities are fixed for the lifetime of a `LogHandler`
//! - Panics are only caught when the logger can record them
//! - No lock is held while calling into the logger

pub mod capability;
pub mod dispatcher;
pub mod entry;
pub mod interceptor;
pub mod poller;

pub use capability::{Failure, FailureLogger, RequestLogger, SlowRequestLogger};
pub use dispatcher::{wrap, LogHandler};
pub use entry::{LogEntry, RequestHead, RequestStart};
pub use interceptor::{Progress, ResponseInterceptor, Snapshot};
pub use poller::SlowRequestPoller;
