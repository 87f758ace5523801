//! OS signal handling.

use crate::lifecycle::shutdown::Shutdown;

/// Trigger `shutdown` once Ctrl+C is received.
///
/// If the signal handler cannot be installed the server keeps running.
pub async fn shutdown_on_ctrl_c(shutdown: Shutdown) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Ctrl+C received, shutting down");
    shutdown.trigger();
}
