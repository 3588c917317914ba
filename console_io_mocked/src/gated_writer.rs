//! A writer whose `write` blocks until a gate is opened.
//!
//! Used to stall the writer thread so that tests can fill the pending queue
//! or observe `flush` waiting.
//!
//! The gate starts closed. Dropping the [`Gate`] opens it, so a stalled
//! writer thread is never left blocked after the test lets go of it.

use parking_lot::{Condvar, Mutex};
use std::io::{Result, Write};
use std::sync::Arc;

use crate::shared_writer::SharedWriter;

struct GateState {
    open: Mutex<bool>,
    changed: Condvar,
}

impl GateState {
    fn set(&self, open: bool) {
        *self.open.lock() = open;
        self.changed.notify_all();
    }

    fn wait_open(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.changed.wait(&mut open);
        }
    }
}

/// Controls a [`GatedWriter`]
pub struct Gate {
    state: Arc<GateState>,
}

impl Gate {
    pub fn open(&self) {
        self.state.set(true);
    }

    pub fn close(&self) {
        self.state.set(false);
    }
}

impl Drop for Gate {
    fn drop(&mut self) {
        self.open();
    }
}

pub struct GatedWriter {
    state: Arc<GateState>,
    output: SharedWriter,
}

impl GatedWriter {
    /// Create a closed gated writer, its gate, and a handle to the written data.
    #[allow(clippy::new_ret_no_self)]
    #[must_use]
    pub fn new() -> (Self, Gate, SharedWriter) {
        let state = Arc::new(GateState {
            open: Mutex::new(false),
            changed: Condvar::new(),
        });
        let output = SharedWriter::new();
        let writer = Self {
            state: Arc::clone(&state),
            output: output.clone(),
        };
        (writer, Gate { state }, output)
    }
}

impl Write for GatedWriter {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.state.wait_open();
        self.output.write(buf)
    }

    fn flush(&mut self) -> Result<()> {
        self.output.flush()
    }
}
