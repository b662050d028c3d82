//! Per-call cancellation and deadline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cancellation handle and optional timeout for one `Pack` call.
///
/// Clones share the same cancellation flag, so a clone kept by another thread
/// can abort a running call.
#[derive(Debug, Clone, Default)]
pub struct PackContext {
    cancelled: Arc<AtomicBool>,
    timeout: Option<Duration>,
}

impl PackContext {
    /// Creates a context with no timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout for the call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Returns the shared cancellation flag.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }
}
