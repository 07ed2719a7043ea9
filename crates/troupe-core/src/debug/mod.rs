//! The default bard: caller-derived tags and chunked output
//!
//! [`DebugBard`] is the reference [`Bard`] for line-limited text backends. For every
//! composed message it
//!
//! 1. uses the explicit tag, or asks its [`CallerTagSource`] for one, or falls back to the
//!    configured tag,
//! 2. truncates a derived tag when a maximum tag length is configured,
//! 3. splits the message on newlines and then into pieces of at most `max_chunk_len`
//!    characters,
//! 4. writes each piece to its [`Sink`](crate::sink::Sink) in order.

mod caller;
mod chunk;
mod config;

use std::fmt;
use std::sync::Arc;

use crate::bard::{Bard, LogError, TagSlot};
use crate::priority::Priority;
use crate::sink::{ConsoleSink, SharedSink};

pub use caller::{is_runtime_frame, normalize_symbol, BacktraceCaller, CallerTagSource, FixedTag};
pub use chunk::{chunk, DEFAULT_MAX_CHUNK_LEN};
pub use config::{
    ConfigError, ConfigResult, DebugBardConfig, DEFAULT_FALLBACK_TAG, ENV_FALLBACK_TAG,
    ENV_LOG_LEVEL, ENV_MAX_CHUNK_LEN, ENV_MAX_TAG_LEN, LEGACY_MAX_TAG_LEN,
};

/// Extra loggability predicate on top of the configured minimum priority
pub type BardFilter = Box<dyn Fn(Option<&str>, Priority) -> bool + Send + Sync>;

/// Default listener that tags lines by caller and chunks long messages
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use troupe_core::{Bard, DebugBard, FixedTag, MemorySink, Priority};
///
/// let sink = Arc::new(MemorySink::new());
/// let bard = DebugBard::new()
///     .with_caller(FixedTag::new("Main"))
///     .with_filter(|_tag, priority| priority >= Priority::INFO)
///     .with_sink(sink.clone());
///
/// bard.debug("dropped");
/// bard.info("first line\nsecond line");
///
/// assert_eq!(sink.lines(), vec!["first line", "second line"]);
/// assert_eq!(sink.tags(), vec!["Main", "Main"]);
/// ```
pub struct DebugBard {
    tag: TagSlot,
    config: DebugBardConfig,
    caller: Arc<dyn CallerTagSource>,
    sink: SharedSink,
    filter: Option<BardFilter>,
}

impl Default for DebugBard {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugBard {
    /// Console output, backtrace-derived tags, default configuration
    pub fn new() -> Self {
        Self::with_config(DebugBardConfig::default())
    }

    /// Console output and backtrace-derived tags with an explicit configuration
    pub fn with_config(config: DebugBardConfig) -> Self {
        Self {
            tag: TagSlot::new(),
            config,
            caller: Arc::new(BacktraceCaller::new()),
            sink: Arc::new(ConsoleSink::new()),
            filter: None,
        }
    }

    /// Configuration taken from the `TROUPE_*` environment variables
    pub fn from_env() -> Self {
        Self::with_config(DebugBardConfig::from_env())
    }

    /// Replace the sink lines are written to
    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the source of caller-derived tags
    pub fn with_caller(mut self, caller: impl CallerTagSource + 'static) -> Self {
        self.caller = Arc::new(caller);
        self
    }

    /// Add a loggability predicate. It sees the explicit tag (if any) and the priority,
    /// and runs after the `min_priority` check.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(Option<&str>, Priority) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn config(&self) -> &DebugBardConfig {
        &self.config
    }

    /// The tag a line will be written under.
    ///
    /// An explicit tag is used as given; only derived and fallback tags are truncated.
    pub fn resolve_tag(&self, explicit: Option<&str>) -> String {
        if let Some(tag) = explicit {
            return tag.to_string();
        }

        let tag = self
            .caller
            .caller_tag()
            .filter(|tag| !tag.is_empty())
            .unwrap_or_else(|| self.config.fallback_tag.clone());

        match self.config.max_tag_len {
            Some(max) if tag.chars().count() > max => tag.chars().take(max).collect(),
            _ => tag,
        }
    }
}

impl fmt::Debug for DebugBard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugBard")
            .field("config", &self.config)
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

impl Bard for DebugBard {
    fn tag_slot(&self) -> &TagSlot {
        &self.tag
    }

    fn is_loggable(&self, tag: Option<&str>, priority: Priority) -> bool {
        priority >= self.config.min_priority
            && self.filter.as_ref().map_or(true, |filter| filter(tag, priority))
    }

    fn emit(&self, priority: Priority, tag: Option<&str>, message: &str, _error: Option<&LogError>) {
        let tag = self.resolve_tag(tag);
        for piece in chunk(message, self.config.max_chunk_len) {
            self.sink.write(priority, &tag, piece);
        }
    }

    fn name(&self) -> &str {
        "DebugBard"
    }
}
