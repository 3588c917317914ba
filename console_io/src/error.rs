//! Error type for console operations.
//!
//! Only a few operations can fail in a way the caller sees: integer parsing,
//! the checked logging variants, deadline-bounded waits and construction.
//! Everything else degrades to empty or default values.

use std::fmt;
use std::num::ParseIntError;
use std::time::Duration;

/// Errors that can occur while reading or writing through the console
#[derive(Debug)]
pub enum ConsoleError {
    /// A token could not be parsed as a base-10 integer
    Parse {
        token: String,
        source: ParseIntError,
    },

    /// A value could not be serialized to JSON
    Serialize(serde_json::Error),

    /// A bounded wait reached its deadline
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// The output queue no longer accepts items
    Closed,

    /// The background writer thread could not be started
    Spawn(std::io::Error),

    /// Invalid or unreadable configuration
    Config(String),
}

impl ConsoleError {
    pub(crate) fn parse(token: &str, source: ParseIntError) -> Self {
        Self::Parse {
            token: token.to_string(),
            source,
        }
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { token, source } => {
                write!(f, "Failed to parse integer from '{token}': {source}")
            }
            Self::Serialize(e) => write!(f, "Failed to serialize value: {e}"),
            Self::Timeout { operation, after } => {
                write!(f, "Timed out after {after:?} waiting for {operation}")
            }
            Self::Closed => write!(f, "Output queue is closed"),
            Self::Spawn(e) => write!(f, "Failed to start writer thread: {e}"),
            Self::Config(msg) => write!(f, "Invalid console configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConsoleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(e) => Some(e),
            Self::Spawn(e) => Some(e),
            Self::Timeout { .. } | Self::Closed | Self::Config(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e)
    }
}
