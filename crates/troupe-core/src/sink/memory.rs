//! In-memory sink

use parking_lot::Mutex;

use super::Sink;
use crate::priority::Priority;

/// One line captured by a [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkRecord {
    pub priority: Priority,
    pub tag: String,
    pub line: String,
}

/// In-memory sink for testing
///
/// Keeps every written line in order until [`clear`](MemorySink::clear) is called.
///
/// # Example
///
/// ```
/// use troupe_core::{MemorySink, Priority, Sink};
///
/// let sink = MemorySink::new();
/// sink.write(Priority::INFO, "Main", "started");
/// assert_eq!(sink.lines(), vec!["started"]);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<SinkRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every captured record, oldest first
    pub fn records(&self) -> Vec<SinkRecord> {
        self.records.lock().clone()
    }

    /// Just the line text of every record
    pub fn lines(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.line.clone()).collect()
    }

    /// Just the tag of every record
    pub fn tags(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.tag.clone()).collect()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for MemorySink {
    fn write(&self, priority: Priority, tag: &str, line: &str) {
        self.records.lock().push(SinkRecord {
            priority,
            tag: tag.to_string(),
            line: line.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.write(Priority::DEBUG, "A", "one");
        sink.write(Priority::WARN, "B", "two");

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.lines(), vec!["one", "two"]);
        assert_eq!(sink.tags(), vec!["A", "B"]);
        assert_eq!(
            sink.records()[1],
            SinkRecord {
                priority: Priority::WARN,
                tag: "B".to_string(),
                line: "two".to_string(),
            }
        );

        sink.clear();
        assert!(sink.is_empty());
    }
}
