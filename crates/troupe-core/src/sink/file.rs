//! File sink for environments where stdout/stderr are not visible

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use parking_lot::Mutex;

use super::Sink;
use crate::priority::Priority;

/// A sink that appends every line to a file
///
/// Lines are formatted as `[HH:MM:SS.mmm] {P}/{tag}: {line}` (UTC wall clock) and flushed
/// immediately. Write errors are swallowed.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Open the default log file in the system temp directory
    pub fn open_default() -> io::Result<Self> {
        Self::open(Self::default_path())
    }

    /// `troupe.log` in the system temp directory
    pub fn default_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push("troupe.log");
        path
    }

    /// Path of the file being written
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncate the file; later lines start from an empty file
    pub fn clear(&self) -> io::Result<()> {
        self.file.lock().set_len(0)
    }
}

impl Sink for FileSink {
    fn write(&self, priority: Priority, tag: &str, line: &str) {
        let mut file = self.file.lock();
        let _ = writeln!(
            file,
            "[{}] {}/{}: {}",
            timestamp(),
            priority.short_label(),
            tag,
            line
        );
        let _ = file.flush();
    }
}

fn timestamp() -> String {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs();
            let millis = d.subsec_millis();
            let hours = (secs % 86400) / 3600;
            let mins = (secs % 3600) / 60;
            let secs = secs % 60;
            format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, millis)
        })
        .unwrap_or_else(|_| "??:??:??.???".to_string())
}
