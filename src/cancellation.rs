//! Provides a token-based mechanism for graceful cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A token that can be used to signal cancellation to a running download.
///
/// This struct is a cloneable, thread-safe wrapper around an `Arc<AtomicBool>`.
/// The tree resolver checks it before every listing request and the fetch
/// batch before launching every file, so an in-flight request still finishes
/// but no new work starts.
///
/// # Examples
///
/// ```
/// use github_dlr::CancellationToken;
///
/// let token = CancellationToken::new();
/// let token_clone = token.clone();
/// assert!(!token_clone.is_cancelled());
///
/// // Signal cancellation, e.g. from a Ctrl+C handler.
/// token.cancel();
/// assert!(token_clone.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new `CancellationToken` in a non-cancelled state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(AtomicBool::new(false)), // false means not cancelled
        }
    }

    /// Signals cancellation.
    ///
    /// All subsequent calls to `is_cancelled()` on this token or any of its
    /// clones will return `true`.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    /// Checks if the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
