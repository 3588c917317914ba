//! Completion counter
//!
//! Counts work items that were handed to the writer thread but are not yet
//! written. Producers call `add` before handing an item over, the writer
//! calls `done` after the item reached the stream, and any thread can
//! `wait` until the count drops to zero.
//!
//! `wait` only promises to observe items whose `add` happened before the
//! call. Items added concurrently by other threads may or may not be waited
//! for.

use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::ConsoleError;

struct Inner {
    pending: Mutex<usize>,
    zero: Condvar,
}

/// Thread-safe counted wait barrier. Clones share the same counter.
#[derive(Clone)]
pub struct CompletionCounter {
    inner: Arc<Inner>,
}

impl CompletionCounter {
    #[must_use]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                pending: Mutex::new(0),
                zero: Condvar::new(),
            }),
        }
    }

    /// Register one outstanding item
    pub fn add(&self) {
        *self.inner.pending.lock() += 1;
    }

    /// Mark one outstanding item as finished
    pub fn done(&self) {
        let mut pending = self.inner.pending.lock();
        if *pending == 0 {
            log::warn!("CompletionCounter::done() called with nothing outstanding");
            return;
        }
        *pending -= 1;
        if *pending == 0 {
            drop(pending);
            self.inner.zero.notify_all();
        }
    }

    /// Number of outstanding items
    #[must_use]
    pub fn pending(&self) -> usize {
        *self.inner.pending.lock()
    }

    /// Block until nothing is outstanding
    pub fn wait(&self) {
        let mut pending = self.inner.pending.lock();
        while *pending > 0 {
            self.inner.zero.wait(&mut pending);
        }
    }

    /// Block until nothing is outstanding, or until `timeout` elapses
    ///
    /// # Errors
    /// Returns `ConsoleError::Timeout` if items are still outstanding at the deadline.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<(), ConsoleError> {
        let deadline = Instant::now() + timeout;
        let mut pending = self.inner.pending.lock();
        while *pending > 0 {
            if self.inner.zero.wait_until(&mut pending, deadline).timed_out() && *pending > 0 {
                return Err(ConsoleError::Timeout {
                    operation: "pending output",
                    after: timeout,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CompletionCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompletionCounter(pending={})", self.pending())
    }
}
