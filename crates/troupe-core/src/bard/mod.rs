//! The listener contract every log backend implements
//!
//! A [`Bard`] receives log calls in one of three shapes (message, error, error + message)
//! at one of the named [`Priority`] levels or an explicit one. All of them funnel into
//! [`Bard::perform`], whose default implementation runs [`compose`]:
//!
//! 1. take and clear the one-time tag,
//! 2. ask [`Bard::is_loggable`],
//! 3. build the final message from the text and the error report,
//! 4. hand the result to [`Bard::emit`].
//!
//! Concrete bards implement `tag_slot` and `emit`, and optionally `is_loggable`.

mod report;

use std::error::Error;

use parking_lot::Mutex;

use crate::priority::Priority;

pub use report::render_report;

/// Shorthand for the error values a bard can be asked to log
pub type LogError = dyn Error + 'static;

/// A one-time tag holder
///
/// Every bard owns its own slot. A tag set here is returned by exactly one [`TagSlot::take`]
/// and then forgotten.
#[derive(Debug, Default)]
pub struct TagSlot {
    tag: Mutex<Option<String>>,
}

impl TagSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag for the next call, replacing any pending tag
    pub fn set(&self, tag: impl Into<String>) {
        *self.tag.lock() = Some(tag.into());
    }

    /// Take the pending tag, leaving the slot empty
    pub fn take(&self) -> Option<String> {
        self.tag.lock().take()
    }

    /// Whether a tag is waiting for the next call
    pub fn is_pending(&self) -> bool {
        self.tag.lock().is_some()
    }
}

/// One pending log call
///
/// Built per call, consumed immediately, never stored.
#[derive(Debug, Clone, Copy)]
pub struct Stanza<'a> {
    pub priority: Priority,
    pub message: Option<&'a str>,
    pub error: Option<&'a LogError>,
}

impl<'a> Stanza<'a> {
    pub fn new(priority: Priority, message: Option<&'a str>, error: Option<&'a LogError>) -> Self {
        Self {
            priority,
            message,
            error,
        }
    }
}

/// A log listener
///
/// # Example
///
/// ```
/// use std::error::Error;
/// use troupe_core::{Bard, Priority, TagSlot};
///
/// #[derive(Default)]
/// struct StderrBard {
///     tag: TagSlot,
/// }
///
/// impl Bard for StderrBard {
///     fn tag_slot(&self) -> &TagSlot {
///         &self.tag
///     }
///
///     fn emit(
///         &self,
///         priority: Priority,
///         tag: Option<&str>,
///         message: &str,
///         _error: Option<&(dyn Error + 'static)>,
///     ) {
///         eprintln!("{} {}: {}", priority, tag.unwrap_or("-"), message);
///     }
/// }
///
/// StderrBard::default().info("Hello, world!");
/// ```
pub trait Bard: Send + Sync {
    /// The slot holding this bard's one-time tag
    fn tag_slot(&self) -> &TagSlot;

    /// Write a composed line to the backend.
    ///
    /// `tag` is `None` when no explicit tag was set; the bard picks its own default.
    /// Implementations must not panic on I/O failure.
    fn emit(&self, priority: Priority, tag: Option<&str>, message: &str, error: Option<&LogError>);

    /// Whether a call with `tag` at `priority` should be emitted
    fn is_loggable(&self, _tag: Option<&str>, _priority: Priority) -> bool {
        true
    }

    /// Human-readable name used in diagnostics
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Set the one-time tag for the next call
    fn set_tag(&self, tag: &str) {
        self.tag_slot().set(tag);
    }

    /// Handle one log call. Every convenience method ends up here.
    fn perform(&self, stanza: &Stanza<'_>) {
        compose(self, stanza);
    }

    /// Log a message at `VERBOSE`
    fn verbose(&self, message: &str) {
        self.log(Priority::VERBOSE, message);
    }

    /// Log an error and a message at `VERBOSE`
    fn verbose_with(&self, error: &LogError, message: &str) {
        self.log_with(Priority::VERBOSE, error, message);
    }

    /// Log an error at `VERBOSE`
    fn verbose_of(&self, error: &LogError) {
        self.log_of(Priority::VERBOSE, error);
    }

    /// Log a message at `DEBUG`
    fn debug(&self, message: &str) {
        self.log(Priority::DEBUG, message);
    }

    /// Log an error and a message at `DEBUG`
    fn debug_with(&self, error: &LogError, message: &str) {
        self.log_with(Priority::DEBUG, error, message);
    }

    /// Log an error at `DEBUG`
    fn debug_of(&self, error: &LogError) {
        self.log_of(Priority::DEBUG, error);
    }

    /// Log a message at `INFO`
    fn info(&self, message: &str) {
        self.log(Priority::INFO, message);
    }

    /// Log an error and a message at `INFO`
    fn info_with(&self, error: &LogError, message: &str) {
        self.log_with(Priority::INFO, error, message);
    }

    /// Log an error at `INFO`
    fn info_of(&self, error: &LogError) {
        self.log_of(Priority::INFO, error);
    }

    /// Log a message at `WARN`
    fn warn(&self, message: &str) {
        self.log(Priority::WARN, message);
    }

    /// Log an error and a message at `WARN`
    fn warn_with(&self, error: &LogError, message: &str) {
        self.log_with(Priority::WARN, error, message);
    }

    /// Log an error at `WARN`
    fn warn_of(&self, error: &LogError) {
        self.log_of(Priority::WARN, error);
    }

    /// Log a message at `ERROR`
    fn error(&self, message: &str) {
        self.log(Priority::ERROR, message);
    }

    /// Log an error and a message at `ERROR`
    fn error_with(&self, error: &LogError, message: &str) {
        self.log_with(Priority::ERROR, error, message);
    }

    /// Log an error at `ERROR`
    fn error_of(&self, error: &LogError) {
        self.log_of(Priority::ERROR, error);
    }

    /// Log a condition that should never happen, at `ASSERT`
    fn wtf(&self, message: &str) {
        self.log(Priority::ASSERT, message);
    }

    /// Log an error and a message at `ASSERT`
    fn wtf_with(&self, error: &LogError, message: &str) {
        self.log_with(Priority::ASSERT, error, message);
    }

    /// Log an error at `ASSERT`
    fn wtf_of(&self, error: &LogError) {
        self.log_of(Priority::ASSERT, error);
    }

    /// Log a message at an explicit priority
    fn log(&self, priority: Priority, message: &str) {
        self.perform(&Stanza::new(priority, Some(message), None));
    }

    /// Log an error and a message at an explicit priority
    fn log_with(&self, priority: Priority, error: &LogError, message: &str) {
        self.perform(&Stanza::new(priority, Some(message), Some(error)));
    }

    /// Log an error at an explicit priority
    fn log_of(&self, priority: Priority, error: &LogError) {
        self.perform(&Stanza::new(priority, None, Some(error)));
    }
}

/// Run the standard composition for `bard` and emit the result.
///
/// The tag is consumed before the loggability check so a suppressed call never leaves a
/// stale tag behind for the next one.
pub fn compose<B: Bard + ?Sized>(bard: &B, stanza: &Stanza<'_>) {
    let tag = bard.tag_slot().take();
    if !bard.is_loggable(tag.as_deref(), stanza.priority) {
        return;
    }

    let Some(message) = compose_message(stanza.message, stanza.error) else {
        return;
    };

    bard.emit(stanza.priority, tag.as_deref(), &message, stanza.error);
}

/// Combine message text and error report. `None` means there is nothing to log.
pub fn compose_message(message: Option<&str>, error: Option<&LogError>) -> Option<String> {
    match (message.filter(|m| !m.is_empty()), error) {
        (None, None) => None,
        (None, Some(error)) => Some(render_report(error)),
        (Some(message), Some(error)) => Some(format!("{}\n{}", message, render_report(error))),
        (Some(message), None) => Some(message.to_string()),
    }
}
