//! Asynchronous buffered writer.
//!
//! `AsyncWriter` hands every output string to a dedicated writer thread
//! through a bounded [`PendingQueue`]. The writer thread owns the buffered
//! output stream, writes items in the order they were admitted and flushes
//! the stream after each one. A [`CompletionCounter`] tracks items that are
//! admitted but not yet flushed; `flush` waits for it to reach zero.
//!
//! # Example
//! ```
//! use console_io::{AsyncWriter, ConsoleConfig};
//!
//! let writer = AsyncWriter::new(std::io::sink(), &ConsoleConfig::default()).unwrap();
//! writer.print("Hello, world!");
//! writer.print_int_array(&[1, 2, 3], " ");
//! writer.flush();
//! assert_eq!(writer.pending(), 0);
//! ```
//!
//! # Thread Safety
//!
//! All methods take `&self`. Several threads may print through one writer
//! (for example with `std::thread::scope` or an `Arc`); items from one
//! thread keep their relative order. Producers block only while the queue
//! is full.
//!
//! Dropping the writer closes the queue, lets the writer thread drain every
//! admitted item and joins it.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fmt;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::completion::CompletionCounter;
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::pending_queue::PendingQueue;

pub struct AsyncWriter {
    queue: Arc<PendingQueue<String>>,
    completion: CompletionCounter,
    worker: Option<JoinHandle<()>>,
    log_indent: String,
}

impl AsyncWriter {
    /// Start a writer thread draining into `out`.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the thread
    /// could not be spawned.
    pub fn new<W>(out: W, config: &ConsoleConfig) -> Result<Self, ConsoleError>
    where
        W: Write + Send + 'static,
    {
        config.validate()?;
        let queue = Arc::new(PendingQueue::new(config.queue_capacity));
        let completion = CompletionCounter::new();

        let worker = {
            let queue = Arc::clone(&queue);
            let completion = completion.clone();
            thread::Builder::new()
                .name(config.worker_name.clone())
                .spawn(move || drain(&queue, &completion, BufWriter::new(out)))
                .map_err(ConsoleError::Spawn)?
        };

        Ok(Self {
            queue,
            completion,
            worker: Some(worker),
            log_indent: config.log_indent.clone(),
        })
    }

    /// Start a writer thread draining into standard output.
    ///
    /// # Errors
    /// See [`AsyncWriter::new`].
    pub fn stdout(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        Self::new(io::stdout(), config)
    }

    /// Enqueue `text` as is. Blocks only while the queue is full.
    pub fn print_inline(&self, text: impl Into<String>) {
        self.completion.add();
        if let Err(e) = self.queue.push(text.into()) {
            self.completion.done();
            log::warn!("AsyncWriter: output dropped: {e}");
        }
    }

    /// Like `print_inline`, but waits at most `timeout` for a queue slot.
    ///
    /// # Errors
    /// Returns `ConsoleError::Timeout` if the queue stayed full; the text is
    /// not written.
    pub fn print_inline_timeout(
        &self,
        text: impl Into<String>,
        timeout: Duration,
    ) -> Result<(), ConsoleError> {
        self.completion.add();
        self.queue.push_timeout(text.into(), timeout).inspect_err(|_| {
            self.completion.done();
        })
    }

    /// Enqueue `text` followed by a newline
    pub fn print(&self, text: impl Into<String>) {
        let mut line = text.into();
        line.push('\n');
        self.print_inline(line);
    }

    pub fn print_int(&self, value: i64) {
        self.print(value.to_string());
    }

    pub fn print_int_inline(&self, value: i64) {
        self.print_inline(value.to_string());
    }

    /// Print items joined by `sep`, followed by a newline
    pub fn print_array<S: AsRef<str>>(&self, items: &[S], sep: &str) {
        let parts: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
        self.print(parts.join(sep));
    }

    pub fn print_int_array(&self, items: &[i64], sep: &str) {
        let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
        self.print_array(&parts, sep);
    }

    /// Print `value` as indented JSON. Nothing is printed if serialization fails.
    pub fn log<T: Serialize + ?Sized>(&self, value: &T) {
        if let Err(e) = self.try_log(value) {
            log::debug!("AsyncWriter::log: {e}");
        }
    }

    /// Print `value` as single-line JSON. Nothing is printed if serialization fails.
    pub fn log_line<T: Serialize + ?Sized>(&self, value: &T) {
        if let Err(e) = self.try_log_line(value) {
            log::debug!("AsyncWriter::log_line: {e}");
        }
    }

    /// # Errors
    /// Returns `ConsoleError::Serialize` if `value` cannot be represented as JSON.
    pub fn try_log<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), ConsoleError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.log_indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        self.print(String::from_utf8_lossy(&buf).into_owned());
        Ok(())
    }

    /// # Errors
    /// Returns `ConsoleError::Serialize` if `value` cannot be represented as JSON.
    pub fn try_log_line<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), ConsoleError> {
        let text = serde_json::to_string(value)?;
        self.print(text);
        Ok(())
    }

    /// Block until everything enqueued before this call is written and flushed
    pub fn flush(&self) {
        self.completion.wait();
    }

    /// Like `flush`, but gives up after `timeout`.
    ///
    /// # Errors
    /// Returns `ConsoleError::Timeout` if output is still pending at the deadline.
    pub fn flush_timeout(&self, timeout: Duration) -> Result<(), ConsoleError> {
        self.completion.wait_timeout(timeout)
    }

    /// Number of items enqueued but not yet flushed
    #[must_use]
    pub fn pending(&self) -> usize {
        self.completion.pending()
    }
}

/// Writer thread body: runs until the queue is closed and drained
fn drain<W: Write>(
    queue: &PendingQueue<String>,
    completion: &CompletionCounter,
    mut out: BufWriter<W>,
) {
    log::debug!("AsyncWriter: writer thread started");
    while let Some(item) = queue.pop() {
        if let Err(e) = out.write_all(item.as_bytes()).and_then(|()| out.flush()) {
            log::error!("AsyncWriter: failed to write {} bytes: {e}", item.len());
            // Drop the unwritten rest of the item so later items are not stuck behind it
            let (inner, _unwritten) = out.into_parts();
            out = BufWriter::new(inner);
        }
        completion.done();
    }
    log::debug!("AsyncWriter: queue closed, writer thread exiting");
}

impl Drop for AsyncWriter {
    fn drop(&mut self) {
        self.queue.close();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("AsyncWriter: writer thread panicked");
            }
        }
    }
}

impl fmt::Debug for AsyncWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AsyncWriter(queue={:?}, pending={})",
            self.queue,
            self.completion.pending()
        )
    }
}
