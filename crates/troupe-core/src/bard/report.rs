//! Text rendering of errors for log output

use std::error::Error;
use std::fmt::Write;

/// Render an error and its chain of sources.
///
/// The first line is the error's `Display`; each source follows on its own
/// `Caused by: ...` line, outermost first.
pub fn render_report(error: &(dyn Error + 'static)) -> String {
    let mut report = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(report, "\nCaused by: {}", cause);
        source = cause.source();
    }
    report
}
