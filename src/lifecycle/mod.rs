//! Process lifecycle.
//!
//! # Data Flow
//! ```text
//! Ctrl+C (signals.rs) → Shutdown::trigger (shutdown.rs)
//!     → HttpServer stops accepting → in-flight requests finish and are logged
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_on_ctrl_c;
