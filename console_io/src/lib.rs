//! Console I/O: synchronous token reading from a line stream and
//! non-blocking writing through a background writer thread.
//!
//! ```text
//! producers ──print*──▶ PendingQueue ──▶ writer thread ──▶ BufWriter ──▶ stdout
//!     │                                        │
//!     └── CompletionCounter::add        CompletionCounter::done
//!                       flush() waits for zero
//! ```

pub mod awriter;
pub mod completion;
pub mod config;
pub mod console;
pub mod error;
pub mod line_reader;
pub mod pending_queue;
pub mod token_parser;

pub use awriter::AsyncWriter;
pub use completion::CompletionCounter;
pub use config::{ConsoleConfig, DEFAULT_QUEUE_CAPACITY};
pub use console::{Console, StdConsole};
pub use error::ConsoleError;
pub use line_reader::LineReader;
pub use pending_queue::PendingQueue;
pub use token_parser::TokenReader;
