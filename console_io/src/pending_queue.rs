//! Bounded FIFO queue shared between producers and the writer thread
//!
//! - `push` blocks while the queue is full (backpressure)
//! - `pop` blocks while the queue is empty
//! - `close` stops admission; `pop` keeps returning the admitted items
//!   and then `None`
//!
//! All state lives under one `parking_lot::Mutex`; the two condition
//! variables are always waited on with that mutex held, so a wakeup
//! cannot be lost between the check and the wait.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use crate::error::ConsoleError;

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
}

pub struct PendingQueue<T> {
    state: Mutex<QueueState<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl<T> PendingQueue<T> {
    /// Create a queue holding at most `capacity` items.
    /// A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }

    /// Append an item, waiting for a free slot if the queue is full.
    ///
    /// # Errors
    /// Returns `ConsoleError::Closed` if the queue was closed.
    pub fn push(&self, item: T) -> Result<(), ConsoleError> {
        self.push_until(item, None)
    }

    /// Append an item, waiting at most `timeout` for a free slot.
    ///
    /// # Errors
    /// Returns `ConsoleError::Timeout` if no slot freed in time, or
    /// `ConsoleError::Closed` if the queue was closed. The item is dropped
    /// in both cases.
    pub fn push_timeout(&self, item: T, timeout: Duration) -> Result<(), ConsoleError> {
        self.push_until(item, Some((Instant::now() + timeout, timeout)))
    }

    fn push_until(
        &self,
        item: T,
        deadline: Option<(Instant, Duration)>,
    ) -> Result<(), ConsoleError> {
        let mut state = self.state.lock();
        loop {
            if state.closed {
                return Err(ConsoleError::Closed);
            }
            if state.items.len() < self.capacity {
                break;
            }
            match deadline {
                None => self.not_full.wait(&mut state),
                Some((deadline, after)) => {
                    let timed_out = self.not_full.wait_until(&mut state, deadline).timed_out();
                    if timed_out && !state.closed && state.items.len() >= self.capacity {
                        return Err(ConsoleError::Timeout {
                            operation: "a free queue slot",
                            after,
                        });
                    }
                }
            }
        }
        state.items.push_back(item);
        drop(state);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove the oldest item, waiting while the queue is empty.
    ///
    /// Returns `None` only when the queue is closed and fully drained.
    pub fn pop(&self) -> Option<T> {
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                drop(state);
                self.not_full.notify_one();
                return Some(item);
            }
            if state.closed {
                return None;
            }
            self.not_empty.wait(&mut state);
        }
    }

    /// Stop admitting items and wake every waiter.
    /// Can be called multiple times.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        drop(state);
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> fmt::Debug for PendingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        write!(
            f,
            "PendingQueue(len={}, capacity={}, closed={})",
            state.items.len(),
            self.capacity,
            state.closed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let queue = PendingQueue::new(4);
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        queue.push(3).unwrap();

        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let queue: PendingQueue<u8> = PendingQueue::new(0);
        assert_eq!(queue.capacity(), 1);
    }

    #[test]
    fn test_push_timeout_on_full_queue() {
        let queue = PendingQueue::new(1);
        queue.push("a").unwrap();

        let err = queue
            .push_timeout("b", Duration::from_millis(20))
            .unwrap_err();

        assert!(matches!(err, ConsoleError::Timeout { .. }));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Some("a"));
    }

    #[test]
    fn test_close_drains_then_ends() {
        let queue = PendingQueue::new(4);
        queue.push("a").unwrap();
        queue.push("b").unwrap();
        assert!(!queue.is_closed());
        queue.close();
        queue.close();
        assert!(queue.is_closed());

        assert!(matches!(queue.push("c"), Err(ConsoleError::Closed)));
        assert_eq!(queue.pop(), Some("a"));
        assert_eq!(queue.pop(), Some("b"));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_blocked_producer_resumes_after_pop() {
        let queue = Arc::new(PendingQueue::new(1));
        queue.push(1).unwrap();

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.push(2))
        };

        assert_eq!(queue.pop(), Some(1));
        producer.join().unwrap().unwrap();
        assert_eq!(queue.pop(), Some(2));
    }

    #[test]
    fn test_close_wakes_blocked_consumer() {
        let queue: Arc<PendingQueue<u8>> = Arc::new(PendingQueue::new(1));

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop())
        };

        thread::sleep(Duration::from_millis(10));
        queue.close();
        assert_eq!(consumer.join().unwrap(), None);
    }
}
