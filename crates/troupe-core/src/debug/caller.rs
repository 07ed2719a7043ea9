//! Deriving a default tag from the calling code
//!
//! [`DebugBard`](super::DebugBard) asks a [`CallerTagSource`] for a tag whenever a call
//! arrives without an explicit one. The default source walks a captured backtrace; tests and
//! platforms without symbolication inject a [`FixedTag`] or a closure instead.

use std::backtrace::{Backtrace, BacktraceStatus};

/// Produces the tag for a call that has no explicit tag
pub trait CallerTagSource: Send + Sync {
    /// Name of the calling scope, or `None` if it cannot be determined
    fn caller_tag(&self) -> Option<String>;
}

impl<F> CallerTagSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn caller_tag(&self) -> Option<String> {
        self()
    }
}

/// Always reports the same tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTag(String);

impl FixedTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

impl CallerTagSource for FixedTag {
    fn caller_tag(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Derives the tag from the first backtrace frame outside the runtime and this crate.
///
/// Capturing a backtrace is slow and needs debug symbols; release builds without symbols get
/// `None` and fall back to the configured tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceCaller;

impl BacktraceCaller {
    pub fn new() -> Self {
        Self
    }
}

impl CallerTagSource for BacktraceCaller {
    fn caller_tag(&self) -> Option<String> {
        let backtrace = Backtrace::force_capture();
        if backtrace.status() != BacktraceStatus::Captured {
            return None;
        }

        let rendered = backtrace.to_string();
        let tag = frame_symbols(&rendered)
            .filter(|symbol| !is_runtime_frame(symbol))
            .find_map(normalize_symbol);
        tag
    }
}

/// Symbol names from a rendered `std::backtrace::Backtrace`, innermost first
fn frame_symbols(rendered: &str) -> impl Iterator<Item = &str> {
    rendered.lines().filter_map(|line| {
        let (index, symbol) = line.trim_start().split_once(": ")?;
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(symbol.trim())
    })
}

const RUNTIME_CRATES: &[&str] = &[
    "std",
    "core",
    "alloc",
    "backtrace",
    "backtrace_rs",
    "test",
    "__rust_begin_short_backtrace",
    "__rust_end_short_backtrace",
    env!("CARGO_CRATE_NAME"),
];

/// Whether a frame belongs to the standard library, the test harness or this crate
pub fn is_runtime_frame(symbol: &str) -> bool {
    if symbol.starts_with("<unknown>") || symbol.is_empty() {
        return true;
    }

    let (self_type, trait_path) = split_impl(strip_hash(symbol));
    let self_root = root_segment(self_type);
    if RUNTIME_CRATES.contains(&self_root) {
        return true;
    }

    // `<F as core::ops::FnOnce<()>>::call_once` and friends: a bare type parameter
    // implementing a runtime trait.
    match trait_path {
        Some(trait_path) => {
            !self_type.contains("::") && RUNTIME_CRATES.contains(&root_segment(trait_path))
        }
        None => false,
    }
}

/// Reduce a demangled symbol to the name of its enclosing type or module.
///
/// Strips the `::h<hash>` suffix, closure markers, generic arguments and trait-impl
/// wrappers, then drops the function name:
///
/// - `app::net::Client::connect::{{closure}}::h0123456789abcdef` → `Client`
/// - `<app::net::Client as core::fmt::Debug>::fmt` → `Client`
/// - `app::main` → `app`
pub fn normalize_symbol(symbol: &str) -> Option<String> {
    let symbol = strip_hash(symbol.trim());
    let (self_type, _) = split_impl(symbol);
    let is_impl = self_type.len() != symbol.len();

    let path = strip_generics(self_type);
    let mut segments: Vec<&str> = path
        .split("::")
        .map(str::trim)
        .filter(|segment| !segment.is_empty() && !is_synthetic(segment))
        .collect();

    // A plain path ends with the function name; an impl wrapper's path is already the type.
    if !is_impl && segments.len() > 1 {
        segments.pop();
    }

    segments.last().map(|segment| segment.to_string())
}

fn is_synthetic(segment: &str) -> bool {
    segment.starts_with('{') || segment.starts_with('<') || segment == "_"
}

/// Remove a trailing `::h` + 16 hex digits legacy mangling hash
fn strip_hash(symbol: &str) -> &str {
    match symbol.rsplit_once("::") {
        Some((head, last))
            if last.len() == 17
                && last.starts_with('h')
                && last[1..].bytes().all(|b| b.is_ascii_hexdigit()) =>
        {
            head
        }
        _ => symbol,
    }
}

/// Split `<Type as Trait>::method` into (`Type`, `Some(Trait)`); plain paths return
/// (`path`, `None`). `<Type>::method` yields (`Type`, `None`) after the method is removed.
fn split_impl(symbol: &str) -> (&str, Option<&str>) {
    let Some(inner) = symbol.strip_prefix('<') else {
        return (symbol, None);
    };

    let mut depth = 1usize;
    let mut close = None;
    for (index, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(index);
                    break;
                }
            }
            _ => {}
        }
    }

    let Some(close) = close else {
        return (symbol, None);
    };

    let wrapped = &inner[..close];
    match find_top_level_as(wrapped) {
        Some(split) => (&wrapped[..split], Some(&wrapped[split + 4..])),
        None => (wrapped, None),
    }
}

fn find_top_level_as(wrapped: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, ch) in wrapped.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ' ' if depth == 0 && wrapped[index..].starts_with(" as ") => return Some(index),
            _ => {}
        }
    }
    None
}

fn strip_generics(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    for ch in path.chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

fn root_segment(path: &str) -> &str {
    let path = path.trim_start_matches('<').trim();
    let end = path.find("::").unwrap_or(path.len());
    let root = &path[..end];
    root.split('<').next().unwrap_or(root).trim()
}
