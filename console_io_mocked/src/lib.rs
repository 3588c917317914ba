pub mod gated_writer;
pub mod shared_writer;

pub use gated_writer::{Gate, GatedWriter};
pub use shared_writer::{SharedWriter, WANT_ERROR};
