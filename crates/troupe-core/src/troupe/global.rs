//! Process-wide troupe
//!
//! Most applications register their bards once at startup and log through the global
//! instance. Code that wants an injectable logger should take an `Arc<dyn Bard>` and be
//! handed [`global().as_bard()`](super::Troupe::as_bard) or its own [`Troupe`].

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::Troupe;
use crate::bard::Bard;
use crate::priority::Priority;

static GLOBAL: Lazy<Arc<Troupe>> = Lazy::new(|| Arc::new(Troupe::new()));

/// The process-wide troupe, created empty on first use
pub fn global() -> &'static Arc<Troupe> {
    &GLOBAL
}

/// Log a message at `priority` through the global troupe
pub fn log(priority: Priority, message: &str) {
    GLOBAL.log(priority, message);
}

/// Log a message at `priority` with a one-time `tag` through the global troupe
pub fn log_tagged(tag: &str, priority: Priority, message: &str) {
    GLOBAL.tag(tag).log(priority, message);
}
