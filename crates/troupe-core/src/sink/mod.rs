//! Backends a [`DebugBard`](crate::DebugBard) writes its chunks to
//!
//! Implementations:
//! - `ConsoleSink`: stdout/stderr
//! - `FileSink`: appends to a log file
//! - `MemorySink`: keeps every line, for tests
//! - `NoOpSink`: discards everything

mod console;
mod file;
mod memory;
mod noop;

use std::sync::Arc;

use crate::priority::Priority;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use memory::{MemorySink, SinkRecord};
pub use noop::NoOpSink;

/// A line-oriented log backend
///
/// `write` is called once per chunk and must not panic; failures are swallowed by the sink.
pub trait Sink: Send + Sync {
    fn write(&self, priority: Priority, tag: &str, line: &str);
}

/// Type alias for an Arc-wrapped sink
pub type SharedSink = Arc<dyn Sink>;
