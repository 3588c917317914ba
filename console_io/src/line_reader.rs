//! Read trimmed lines from a buffered input stream.
//!
//! # Example
//!
//! ```
//! use console_io::LineReader;
//! use std::io::Cursor;
//!
//! let mut reader = LineReader::new(Cursor::new("  first \nsecond"));
//! assert_eq!(reader.read_line(), "first");
//! assert_eq!(reader.read_line(), "second");
//! assert_eq!(reader.read_line(), "");
//! assert!(reader.is_exhausted());
//! ```

use std::io::{self, BufRead, BufReader, Stdin};

pub struct LineReader<R> {
    inner: R,
    exhausted: bool,
}

impl<R: BufRead> LineReader<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            exhausted: false,
        }
    }

    /// Read the next line, with surrounding whitespace and the terminator removed.
    ///
    /// At end of stream returns the partial content read so far, possibly empty,
    /// and keeps returning empty strings afterwards. Read errors are logged and
    /// otherwise treated like end of stream.
    pub fn read_line(&mut self) -> String {
        self.next_line().unwrap_or_default()
    }

    /// Like `read_line`, but returns `None` once the stream is exhausted
    /// instead of an empty string.
    pub fn next_line(&mut self) -> Option<String> {
        let mut raw = Vec::new();
        match self.inner.read_until(b'\n', &mut raw) {
            Ok(0) => {
                self.exhausted = true;
                return None;
            }
            Ok(_) => {
                if raw.last() != Some(&b'\n') {
                    self.exhausted = true;
                }
            }
            Err(e) => {
                log::warn!("LineReader: read failed after {} bytes: {e}", raw.len());
                self.exhausted = true;
                if raw.is_empty() {
                    return None;
                }
            }
        }
        Some(String::from_utf8_lossy(&raw).trim().to_string())
    }

    /// True once a read has reached the end of the stream
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl LineReader<BufReader<Stdin>> {
    /// Create a reader over buffered standard input
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R> std::fmt::Debug for LineReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineReader")
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}
