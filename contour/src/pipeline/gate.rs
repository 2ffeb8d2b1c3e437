//! Supersession of in-flight requests.

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

/// Hands out one cancellation token per request and cancels the previous one,
/// so a newer request always supersedes an older one still in flight.
#[derive(Debug, Default)]
pub struct RequestGate {
    current: Mutex<Option<CancellationToken>>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the previous request's token and returns a fresh one.
    pub fn begin(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.current.lock().replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Cancels the current request, if any.
    pub fn cancel(&self) {
        if let Some(current) = self.current.lock().take() {
            current.cancel();
        }
    }
}
