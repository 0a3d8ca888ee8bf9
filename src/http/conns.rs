//! In-flight request registry with cancel-all semantics.
//!
//! A chat session fires off many HTTP requests concurrently; when the user
//! logs out or the connection drops, every one of them must be aborted.
//! [`HttpConns`] tracks the session's in-flight requests by handle identity
//! and cancels them all at once, after which the registry refuses further
//! traffic until it is explicitly [`reset`](HttpConns::reset) for the next
//! session.

use crate::base::error::HttpError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Why an in-flight request is being torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The session canceled all outstanding requests (logout, disconnect).
    Canceled,
    /// The client itself is going away.
    Shutdown,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::Canceled => f.write_str("canceled"),
            AbortReason::Shutdown => f.write_str("shutdown"),
        }
    }
}

/// Transport-side capability to abort one in-flight request.
///
/// Aborting a request that has already completed MUST be a safe no-op:
/// cancellation races against completion callbacks arriving on the I/O path,
/// and the registry never waits for either.
pub trait AbortRequest: Send + Sync {
    fn abort(&self, reason: AbortReason);
}

/// Opaque handle to an in-flight request.
///
/// Registry membership is keyed on the identity of the `Arc` allocation, so
/// re-adding a clone of the same handle replaces rather than duplicates.
pub type RequestHandle = Arc<dyn AbortRequest>;

/// [`AbortRequest`] adapter for requests driven as spawned tokio tasks.
///
/// `tokio::task::AbortHandle::abort` on a finished task is already a no-op,
/// which is exactly the completion-race behavior the registry requires.
pub struct TaskHandle {
    inner: tokio::task::AbortHandle,
}

impl TaskHandle {
    pub fn new(inner: tokio::task::AbortHandle) -> Self {
        Self { inner }
    }
}

impl AbortRequest for TaskHandle {
    fn abort(&self, reason: AbortReason) {
        tracing::debug!(reason = %reason, "aborting request task");
        self.inner.abort();
    }
}

/// Set of in-flight requests for one client session.
///
/// The registry is single-use per session lifecycle: once
/// [`cancel_all`](Self::cancel_all) has run, `add`/`remove`/`cancel_all`
/// return [`HttpError::InvalidState`] until [`reset`](Self::reset) restores
/// the fresh state for the next connect cycle.
///
/// Callers serialize mutation on one instance (confine it to the client's
/// event context, or wrap it in a mutex); the registry holds no lock and
/// spawns no tasks of its own.
pub struct HttpConns {
    conns: HashMap<usize, RequestHandle>,
    canceled: bool,
}

impl HttpConns {
    /// Create an open, empty registry.
    pub fn new() -> Self {
        Self {
            conns: HashMap::new(),
            canceled: false,
        }
    }

    fn key(handle: &RequestHandle) -> usize {
        Arc::as_ptr(handle) as *const () as usize
    }

    /// Track an in-flight request.
    ///
    /// Re-adding a handle already present replaces the stored entry.
    pub fn add(&mut self, handle: RequestHandle) -> Result<(), HttpError> {
        if self.canceled {
            return Err(HttpError::InvalidState("add on canceled registry"));
        }
        self.conns.insert(Self::key(&handle), handle);
        Ok(())
    }

    /// Stop tracking a request, typically on natural completion or error.
    ///
    /// Removing a handle that is not tracked is a no-op.
    pub fn remove(&mut self, handle: &RequestHandle) -> Result<(), HttpError> {
        if self.canceled {
            return Err(HttpError::InvalidState("remove on canceled registry"));
        }
        self.conns.remove(&Self::key(handle));
        Ok(())
    }

    /// Whether [`cancel_all`](Self::cancel_all) has run since the last reset.
    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// Cancel every tracked request and close the registry.
    ///
    /// Each handle is removed exactly once and told to abort with
    /// [`AbortReason::Canceled`]. Cancellation is fire-and-forget: this does
    /// not wait for the transport to deliver completion callbacks, and
    /// aborting a request that already finished naturally is a no-op.
    pub fn cancel_all(&mut self) -> Result<(), HttpError> {
        if self.canceled {
            return Err(HttpError::InvalidState("cancel_all on canceled registry"));
        }

        self.canceled = true;
        tracing::debug!(count = self.conns.len(), "canceling all in-flight requests");

        for (_, handle) in self.conns.drain() {
            handle.abort(AbortReason::Canceled);
        }
        Ok(())
    }

    /// Restore the fresh open state, dropping any tracked handles.
    ///
    /// Valid in any state; this is the only operation permitted after
    /// cancellation, enabling reuse across reconnect cycles.
    pub fn reset(&mut self) {
        tracing::debug!(dropped = self.conns.len(), "resetting request registry");
        self.canceled = false;
        self.conns.clear();
    }

    /// Number of tracked in-flight requests.
    pub fn len(&self) -> usize {
        self.conns.len()
    }

    /// Check whether no requests are tracked.
    pub fn is_empty(&self) -> bool {
        self.conns.is_empty()
    }
}

impl Default for HttpConns {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HttpConns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpConns")
            .field("conns", &self.conns.len())
            .field("canceled", &self.canceled)
            .finish()
    }
}
