//! Console sink implementation

use std::io::{self, Write};

use super::Sink;
use crate::priority::Priority;

/// A sink that writes to the console
///
/// Lines below `WARN` go to stdout, the rest to stderr, formatted as
/// `{prefix} {P}/{tag}: {line}`.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    prefix: String,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink {
    /// Create a console sink with the default prefix
    pub fn new() -> Self {
        Self {
            prefix: "[troupe]".to_string(),
        }
    }

    /// Create a console sink with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn format(&self, priority: Priority, tag: &str, line: &str) -> String {
        format!("{} {}/{}: {}", self.prefix, priority.short_label(), tag, line)
    }
}

impl Sink for ConsoleSink {
    fn write(&self, priority: Priority, tag: &str, line: &str) {
        let formatted = self.format(priority, tag, line);
        // Write errors (closed pipe and the like) are dropped.
        if priority >= Priority::WARN {
            let _ = writeln!(io::stderr().lock(), "{}", formatted);
        } else {
            let _ = writeln!(io::stdout().lock(), "{}", formatted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_sink_creation() {
        let sink = ConsoleSink::new();
        assert_eq!(sink.prefix(), "[troupe]");

        let custom = ConsoleSink::with_prefix("[MyApp]");
        assert_eq!(custom.prefix(), "[MyApp]");
    }

    #[test]
    fn test_console_sink_format() {
        let sink = ConsoleSink::with_prefix("[app]");
        assert_eq!(sink.format(Priority::INFO, "Net", "connected"), "[app] I/Net: connected");
        assert_eq!(sink.format(Priority::new(9), "X", "odd"), "[app] ?/X: odd");
    }

    #[test]
    fn test_console_sink_writes() {
        // Only checks that writing does not panic
        let sink = ConsoleSink::new();
        sink.write(Priority::DEBUG, "Test", "debug line");
        sink.write(Priority::ERROR, "Test", "error line");
    }
}
