//! Console: one token reader and one asynchronous writer behind one handle.
//!
//! The console is built once at startup and passed to the code that needs it.
//!
//! ```
//! use console_io::{Console, ConsoleConfig};
//! use std::io::Cursor;
//!
//! let mut console =
//!     Console::new(Cursor::new("3\n"), std::io::sink(), &ConsoleConfig::default()).unwrap();
//! let n = console.read_int().unwrap();
//! console.print_int(n * 2);
//! console.flush();
//! ```

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader, Stdin, Write};
use std::time::Duration;

use crate::awriter::AsyncWriter;
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::token_parser::TokenReader;

/// Console reading from buffered standard input and writing to standard output
pub type StdConsole = Console<BufReader<Stdin>>;

pub struct Console<R> {
    reader: TokenReader<R>,
    writer: AsyncWriter,
}

impl<R: BufRead> Console<R> {
    /// # Errors
    /// Returns an error if the writer thread could not be started.
    pub fn new<W>(input: R, output: W, config: &ConsoleConfig) -> Result<Self, ConsoleError>
    where
        W: Write + Send + 'static,
    {
        Ok(Self {
            reader: TokenReader::new(input),
            writer: AsyncWriter::new(output, config)?,
        })
    }

    #[must_use]
    pub fn from_parts(reader: TokenReader<R>, writer: AsyncWriter) -> Self {
        Self { reader, writer }
    }

    pub fn reader_mut(&mut self) -> &mut TokenReader<R> {
        &mut self.reader
    }

    /// The writer half, shareable with other threads
    #[must_use]
    pub fn writer(&self) -> &AsyncWriter {
        &self.writer
    }

    // Reader side

    pub fn read_line(&mut self) -> String {
        self.reader.read_line()
    }

    pub fn next_line(&mut self) -> Option<String> {
        self.reader.next_line()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.reader.is_exhausted()
    }

    pub fn read_array(&mut self, sep: &str) -> Vec<String> {
        self.reader.read_array(sep)
    }

    pub fn read_array_clean(&mut self, sep: &str) -> Vec<String> {
        self.reader.read_array_clean(sep)
    }

    pub fn read_hashset(&mut self, sep: &str) -> HashSet<String> {
        self.reader.read_hashset(sep)
    }

    pub fn read_pairs(&mut self, sep: &str, skip: usize) -> HashMap<String, String> {
        self.reader.read_pairs(sep, skip)
    }

    /// # Errors
    /// Fails if any value token is not an integer.
    pub fn read_string_int_pairs(
        &mut self,
        sep: &str,
        skip: usize,
    ) -> Result<HashMap<String, i64>, ConsoleError> {
        self.reader.read_string_int_pairs(sep, skip)
    }

    pub fn read_boolean(&mut self, positive_response: &str) -> bool {
        self.reader.read_boolean(positive_response)
    }

    /// # Errors
    /// Fails if the line is not an integer.
    pub fn read_int(&mut self) -> Result<i64, ConsoleError> {
        self.reader.read_int()
    }

    /// # Errors
    /// Fails on the first token that is not an integer.
    pub fn read_int_array(&mut self, sep: &str) -> Result<Vec<i64>, ConsoleError> {
        self.reader.read_int_array(sep)
    }

    // Writer side

    pub fn print_inline(&self, text: impl Into<String>) {
        self.writer.print_inline(text);
    }

    /// # Errors
    /// See [`AsyncWriter::print_inline_timeout`].
    pub fn print_inline_timeout(
        &self,
        text: impl Into<String>,
        timeout: Duration,
    ) -> Result<(), ConsoleError> {
        self.writer.print_inline_timeout(text, timeout)
    }

    pub fn print(&self, text: impl Into<String>) {
        self.writer.print(text);
    }

    pub fn print_int(&self, value: i64) {
        self.writer.print_int(value);
    }

    pub fn print_int_inline(&self, value: i64) {
        self.writer.print_int_inline(value);
    }

    pub fn print_array<S: AsRef<str>>(&self, items: &[S], sep: &str) {
        self.writer.print_array(items, sep);
    }

    pub fn print_int_array(&self, items: &[i64], sep: &str) {
        self.writer.print_int_array(items, sep);
    }

    pub fn log<T: Serialize + ?Sized>(&self, value: &T) {
        self.writer.log(value);
    }

    pub fn log_line<T: Serialize + ?Sized>(&self, value: &T) {
        self.writer.log_line(value);
    }

    /// # Errors
    /// See [`AsyncWriter::try_log`].
    pub fn try_log<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), ConsoleError> {
        self.writer.try_log(value)
    }

    /// # Errors
    /// See [`AsyncWriter::try_log_line`].
    pub fn try_log_line<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), ConsoleError> {
        self.writer.try_log_line(value)
    }

    pub fn flush(&self) {
        self.writer.flush();
    }

    /// # Errors
    /// See [`AsyncWriter::flush_timeout`].
    pub fn flush_timeout(&self, timeout: Duration) -> Result<(), ConsoleError> {
        self.writer.flush_timeout(timeout)
    }
}

impl StdConsole {
    /// Console over standard input and standard output
    ///
    /// # Errors
    /// Returns an error if the writer thread could not be started.
    pub fn stdio(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        Ok(Self::from_parts(
            TokenReader::stdin(),
            AsyncWriter::stdout(config)?,
        ))
    }
}

impl<R> std::fmt::Debug for Console<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("writer", &self.writer)
            .finish_non_exhaustive()
    }
}
