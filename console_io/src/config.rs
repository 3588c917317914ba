use serde::Deserialize;

use crate::error::ConsoleError;

/// Default number of pending output items before producers block
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Slots in the pending output queue
    pub queue_capacity: usize,
    /// Name given to the background writer thread
    pub worker_name: String,
    /// Indentation unit used by `log`
    pub log_indent: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            worker_name: "console-writer".to_string(),
            log_indent: "\t".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Creates a new `ConsoleConfig` by reading JSON from a reader.
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are I/O errors reading from the provided reader
    /// - The JSON input is invalid, malformed or has unknown fields
    /// - The resulting configuration fails `validate`
    pub fn from_reader(mut reader: impl std::io::Read) -> Result<Self, ConsoleError> {
        let mut buffer = Vec::new();
        reader
            .read_to_end(&mut buffer)
            .map_err(|e| ConsoleError::Config(format!("Failed to read config: {e}")))?;

        let config: ConsoleConfig = serde_json::from_slice(&buffer)
            .map_err(|e| ConsoleError::Config(format!("Failed to parse config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns an error if the queue capacity is zero.
    pub fn validate(&self) -> Result<(), ConsoleError> {
        if self.queue_capacity == 0 {
            return Err(ConsoleError::Config(
                "queue_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }
}
