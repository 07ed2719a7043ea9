//! Troupe Core
//!
//! A small, pluggable logging facade. Log calls go to a [`Troupe`], which fans them out to
//! every registered [`Bard`]. Each bard decides whether the call is loggable, composes the
//! final message (text plus error report) and writes it to its own backend.
//!
//! ```rust
//! use std::sync::Arc;
//! use troupe_core::{Bard, DebugBard, FixedTag, MemorySink, Troupe};
//!
//! let sink = Arc::new(MemorySink::new());
//! let troupe = Arc::new(Troupe::new());
//! troupe
//!     .register(Arc::new(
//!         DebugBard::new().with_caller(FixedTag::new("App")).with_sink(sink.clone()),
//!     ))
//!     .unwrap();
//!
//! troupe.tag("Startup").info("configuration loaded");
//! troupe.warn("cache is cold");
//!
//! assert_eq!(sink.tags(), vec!["Startup", "App"]);
//! ```
//!
//! ## Tags
//!
//! [`Troupe::tag`] sets a one-time tag on every registered bard. Each bard consumes its copy
//! on its next call, even if that call is filtered out, so a tag never leaks onto a later
//! unrelated line. Without an explicit tag [`DebugBard`] derives one from the caller.
//!
//! ## Global instance
//!
//! [`global()`] returns a lazily created process-wide troupe for applications that prefer
//! static access; everything else works the same on explicitly constructed instances.

pub mod bard;
pub mod debug;
pub mod priority;
pub mod sink;
pub mod troupe;

mod macros;

pub use bard::{compose, compose_message, render_report, Bard, LogError, Stanza, TagSlot};

pub use debug::{
    chunk, BacktraceCaller, BardFilter, CallerTagSource, ConfigError, ConfigResult, DebugBard,
    DebugBardConfig, FixedTag, DEFAULT_MAX_CHUNK_LEN, LEGACY_MAX_TAG_LEN,
};

pub use priority::{ParsePriorityError, Priority};

pub use sink::{ConsoleSink, FileSink, MemorySink, NoOpSink, SharedSink, Sink, SinkRecord};

pub use troupe::global::{global, log, log_tagged};
pub use troupe::{FanOut, Troupe, TroupeError, TroupeResult};
