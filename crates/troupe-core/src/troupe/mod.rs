//! The registry and fan-out point for bards
//!
//! A [`Troupe`] keeps an ordered list of registered [`Bard`]s and forwards every log call
//! to each of them. It is itself a `Bard`, so it can be injected anywhere a single listener
//! is expected.
//!
//! Registration changes are serialised on a mutex and published as a fresh immutable
//! snapshot. Dispatch loads the snapshot once per call and never takes the lock, so a call
//! racing a registration may see either the old or the new set of bards, but never a
//! partially updated one.
//!
//! Calls run synchronously on the caller's thread. A bard that blocks blocks the caller.

mod error;
pub mod global;

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use crate::bard::{Bard, LogError, Stanza, TagSlot};
use crate::priority::Priority;

pub use error::{TroupeError, TroupeResult};

/// How a troupe treats a bard that panics while handling a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FanOut {
    /// The panic unwinds out of the dispatch loop. Bards after the failing one do not see
    /// the call.
    #[default]
    Propagate,
    /// The panic is caught and reported on stderr; the remaining bards still see the call.
    Isolated,
}

/// Registry of bards and dispatcher for log calls
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use troupe_core::{Bard, DebugBard, FixedTag, MemorySink, Troupe};
///
/// let sink = Arc::new(MemorySink::new());
/// let troupe = Arc::new(Troupe::new());
/// troupe
///     .register(Arc::new(
///         DebugBard::new().with_caller(FixedTag::new("Main")).with_sink(sink.clone()),
///     ))
///     .unwrap();
///
/// troupe.tag("Net").info("connected");
/// troupe.info("ready");
///
/// assert_eq!(sink.tags(), vec!["Net", "Main"]);
/// ```
pub struct Troupe {
    bards: Mutex<Vec<Arc<dyn Bard>>>,
    snapshot: ArcSwap<Vec<Arc<dyn Bard>>>,
    tag: TagSlot,
    fan_out: FanOut,
}

impl Troupe {
    /// Create an empty troupe with the default fan-out policy
    pub fn new() -> Self {
        Self::with_fan_out(FanOut::default())
    }

    /// Create an empty troupe with an explicit fan-out policy
    pub fn with_fan_out(fan_out: FanOut) -> Self {
        Self {
            bards: Mutex::new(Vec::new()),
            snapshot: ArcSwap::from_pointee(Vec::new()),
            tag: TagSlot::new(),
            fan_out,
        }
    }

    /// The fan-out policy in use
    pub fn fan_out(&self) -> FanOut {
        self.fan_out
    }

    /// This troupe viewed as a single bard.
    ///
    /// Useful for injecting a logger rather than calling the troupe directly, and for tests.
    pub fn as_bard(self: &Arc<Self>) -> Arc<dyn Bard> {
        Arc::clone(self) as Arc<dyn Bard>
    }

    /// Set a one-time tag on every currently registered bard.
    ///
    /// Each bard holds its own copy and consumes it on its next call.
    pub fn tag(&self, tag: &str) -> &Self {
        for bard in self.snapshot.load().iter() {
            bard.set_tag(tag);
        }
        self
    }

    /// Register a bard
    pub fn register(&self, bard: Arc<dyn Bard>) -> TroupeResult<()> {
        if self.is_self(&bard) {
            return Err(TroupeError::SelfRegistration);
        }

        let mut bards = self.bards.lock();
        bards.push(bard);
        self.publish(&bards);
        Ok(())
    }

    /// Register several bards at once.
    ///
    /// Every bard is checked before any is added, so a rejected batch leaves the registry
    /// untouched.
    pub fn register_all<I>(&self, bards: I) -> TroupeResult<()>
    where
        I: IntoIterator<Item = Arc<dyn Bard>>,
    {
        let incoming: Vec<_> = bards.into_iter().collect();
        if incoming.iter().any(|bard| self.is_self(bard)) {
            return Err(TroupeError::SelfRegistration);
        }

        let mut registered = self.bards.lock();
        registered.extend(incoming);
        self.publish(&registered);
        Ok(())
    }

    /// Remove the first registration of `bard`
    pub fn unregister(&self, bard: &Arc<dyn Bard>) -> TroupeResult<()> {
        let mut bards = self.bards.lock();
        let position = bards
            .iter()
            .position(|registered| same_bard(registered, bard))
            .ok_or_else(|| TroupeError::NotRegistered(bard.name().to_string()))?;

        bards.remove(position);
        self.publish(&bards);
        Ok(())
    }

    /// Remove every registered bard
    pub fn unregister_all(&self) {
        let mut bards = self.bards.lock();
        bards.clear();
        self.publish(&bards);
    }

    /// A copy of the registered bards in registration order
    pub fn listeners(&self) -> Vec<Arc<dyn Bard>> {
        self.bards.lock().clone()
    }

    /// Number of registered bards
    pub fn listener_count(&self) -> usize {
        self.snapshot.load().len()
    }

    // Called with the writer lock held.
    fn publish(&self, bards: &[Arc<dyn Bard>]) {
        self.snapshot.store(Arc::new(bards.to_vec()));
    }

    fn is_self(&self, bard: &Arc<dyn Bard>) -> bool {
        Arc::as_ptr(bard).cast::<()>() == (self as *const Self).cast::<()>()
    }

    fn deliver(&self, bard: &Arc<dyn Bard>, stanza: &Stanza<'_>) {
        match self.fan_out {
            FanOut::Propagate => bard.perform(stanza),
            FanOut::Isolated => {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| bard.perform(stanza)));
                if let Err(payload) = outcome {
                    eprintln!(
                        "[troupe] bard '{}' panicked: {}",
                        bard.name(),
                        panic_message(payload.as_ref())
                    );
                }
            }
        }
    }
}

impl Default for Troupe {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Troupe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot.load();
        let names: Vec<&str> = snapshot.iter().map(|bard| bard.name()).collect();
        f.debug_struct("Troupe")
            .field("bards", &names)
            .field("fan_out", &self.fan_out)
            .finish()
    }
}

impl Bard for Troupe {
    fn tag_slot(&self) -> &TagSlot {
        &self.tag
    }

    /// Forward an already composed line to every bard's `emit`, bypassing their composition.
    fn emit(&self, priority: Priority, tag: Option<&str>, message: &str, error: Option<&LogError>) {
        for bard in self.snapshot.load_full().iter() {
            bard.emit(priority, tag, message, error);
        }
    }

    fn name(&self) -> &str {
        "Troupe"
    }

    fn set_tag(&self, tag: &str) {
        self.tag(tag);
    }

    fn perform(&self, stanza: &Stanza<'_>) {
        let bards = self.snapshot.load_full();
        for bard in bards.iter() {
            self.deliver(bard, stanza);
        }
    }
}

fn same_bard(a: &Arc<dyn Bard>, b: &Arc<dyn Bard>) -> bool {
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}
