//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! LogHandler produces LogEntry values
//!     → tracing_logger.rs (request / failure / slow events)
//!     → logging.rs (subscriber, filtering, formatting)
//!     → stdout
//! ```

pub mod logging;
pub mod tracing_logger;

pub use logging::init_logging;
pub use tracing_logger::TracingLogger;
