//! Log priority scale

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Severity of a log call.
///
/// The named levels form a total order `VERBOSE < DEBUG < INFO < WARN < ERROR < ASSERT`
/// with the same integer values Android's `Log` uses. Any other integer is a valid
/// priority too; it simply has no name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(i32);

impl Priority {
    pub const VERBOSE: Priority = Priority(2);
    pub const DEBUG: Priority = Priority(3);
    pub const INFO: Priority = Priority(4);
    pub const WARN: Priority = Priority(5);
    pub const ERROR: Priority = Priority(6);
    pub const ASSERT: Priority = Priority(7);

    /// Wrap a raw priority value
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// The raw integer value
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Name of a well-known priority, `None` for anything else
    pub fn name(self) -> Option<&'static str> {
        match self {
            Priority::VERBOSE => Some("VERBOSE"),
            Priority::DEBUG => Some("DEBUG"),
            Priority::INFO => Some("INFO"),
            Priority::WARN => Some("WARN"),
            Priority::ERROR => Some("ERROR"),
            Priority::ASSERT => Some("ASSERT"),
            _ => None,
        }
    }

    /// One-letter label (`V`, `D`, `I`, `W`, `E`, `A`), `?` for unnamed priorities
    pub fn short_label(self) -> char {
        match self {
            Priority::VERBOSE => 'V',
            Priority::DEBUG => 'D',
            Priority::INFO => 'I',
            Priority::WARN => 'W',
            Priority::ERROR => 'E',
            Priority::ASSERT => 'A',
            _ => '?',
        }
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<Priority> for i32 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Error returned when a string is not a recognisable priority
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "v" | "verbose" | "trace" => Ok(Priority::VERBOSE),
            "d" | "debug" => Ok(Priority::DEBUG),
            "i" | "info" => Ok(Priority::INFO),
            "w" | "warn" | "warning" => Ok(Priority::WARN),
            "e" | "error" => Ok(Priority::ERROR),
            "a" | "assert" | "wtf" => Ok(Priority::ASSERT),
            other => other
                .parse::<i32>()
                .map(Priority)
                .map_err(|_| ParsePriorityError(trimmed.to_string())),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(Priority(value)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}
