//! No-op sink implementation

use super::Sink;
use crate::priority::Priority;

/// A sink that does nothing
///
/// Useful for benchmarks or when a bard's output is not needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl NoOpSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for NoOpSink {
    fn write(&self, _priority: Priority, _tag: &str, _line: &str) {}
}
