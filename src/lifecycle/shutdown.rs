//! Server shutdown signal.

use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

/// Cloneable stop switch for the server.
///
/// Built on the same cancellation token the slow request poller uses, so a
/// trigger is sticky: anyone who starts waiting afterwards returns at once.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!("Shutdown triggered");
        }
        self.token.cancel();
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once [`trigger`](Self::trigger) has been called on any clone.
    pub fn wait(&self) -> WaitForCancellationFutureOwned {
        self.token.clone().cancelled_owned()
    }
}
