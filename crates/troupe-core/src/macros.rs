//! Convenience macros for logging with format arguments
//!
//! The message is formatted at the call site; bards never interpret `%` or `{}` themselves.
//!
//! ```
//! use std::sync::Arc;
//! use troupe_core::{log_info, DebugBard, FixedTag, MemorySink};
//!
//! let sink = Arc::new(MemorySink::new());
//! let bard = DebugBard::new().with_caller(FixedTag::new("Main")).with_sink(sink.clone());
//!
//! log_info!(bard, "{} bards registered", 3);
//! assert_eq!(sink.lines(), vec!["3 bards registered"]);
//! ```

#[macro_export]
macro_rules! log_verbose {
    ($bard:expr, $($arg:tt)*) => {{
        use $crate::Bard as _;
        $bard.verbose(&format!($($arg)*))
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($bard:expr, $($arg:tt)*) => {{
        use $crate::Bard as _;
        $bard.debug(&format!($($arg)*))
    }};
}

#[macro_export]
macro_rules! log_info {
    ($bard:expr, $($arg:tt)*) => {{
        use $crate::Bard as _;
        $bard.info(&format!($($arg)*))
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($bard:expr, $($arg:tt)*) => {{
        use $crate::Bard as _;
        $bard.warn(&format!($($arg)*))
    }};
}

#[macro_export]
macro_rules! log_error {
    ($bard:expr, $($arg:tt)*) => {{
        use $crate::Bard as _;
        $bard.error(&format!($($arg)*))
    }};
}

#[macro_export]
macro_rules! log_assert {
    ($bard:expr, $($arg:tt)*) => {{
        use $crate::Bard as _;
        $bard.wtf(&format!($($arg)*))
    }};
}
