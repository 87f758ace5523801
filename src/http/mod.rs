//! HTTP adapter subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum router, request ID, panic catching)
//!     → HandlerService (tower Service → Handler)
//!     → handler.rs (Handler trait; LogHandler wraps user handlers)
//!     → response.rs (BufferedResponse collects status, headers, body)
//!     → Send to client
//! ```

pub mod echo;
pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use echo::EchoHandler;
pub use handler::Handler;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::{BufferedResponse, ResponseWriter};
pub use server::{HandlerService, HttpServer};
