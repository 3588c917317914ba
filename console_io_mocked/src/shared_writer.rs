//! A writer that stores written data in memory for later inspection.
//!
//! Clones share the same storage, so one clone can be handed to the writer
//! thread while the test keeps another.
//!
//! - `WANT_ERROR` in the written data makes `write` fail, after storing
//!   the bytes that precede it.
//!
//! # Example
//! ```
//! use console_io_mocked::SharedWriter;
//! use std::io::Write;
//!
//! let mut writer = SharedWriter::new();
//! writer.write_all(b"Hello, world!").unwrap();
//! assert_eq!(writer.get_output(), "Hello, world!");
//! ```

use parking_lot::Mutex;
use std::io::{Error, ErrorKind, Result, Write};
use std::sync::Arc;

pub const WANT_ERROR: char = '\u{0001}';

#[derive(Default)]
struct Storage {
    data: Vec<u8>,
    flushes: usize,
}

#[derive(Clone, Default)]
pub struct SharedWriter {
    inner: Arc<Mutex<Storage>>,
}

impl SharedWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get_output(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().data).to_string()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().data.is_empty()
    }

    /// Number of `flush` calls seen so far
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.inner.lock().flushes
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let mut storage = self.inner.lock();
        match buf.iter().position(|&b| b == WANT_ERROR as u8) {
            Some(0) => Err(Error::new(ErrorKind::Other, "Failed to write: WANT_ERROR")),
            Some(n) => {
                storage.data.extend_from_slice(&buf[..n]);
                Ok(n)
            }
            None => {
                storage.data.extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.lock().flushes += 1;
        Ok(())
    }
}
