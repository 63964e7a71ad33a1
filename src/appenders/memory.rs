//! In-memory appender
//!
//! Captures emitted lines instead of writing them anywhere, so code that logs
//! through a [`LogSink`](crate::LogSink) can be tested without touching
//! stdout or the file system.

use crate::core::{Appender, LogEntry, LoggerError, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to a shared line buffer. Clones see the same lines.
#[derive(Clone, Default)]
pub struct MemoryAppender {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    fail_writes: bool,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// An appender whose every write fails, for exercising the swallow path.
    pub fn failing() -> Self {
        Self {
            entries: Arc::default(),
            fail_writes: true,
        }
    }

    /// Captured lines in stdout form, `"<TAG> <line>"`.
    pub fn lines(&self) -> Vec<String> {
        self.entries.lock().iter().map(LogEntry::tagged).collect()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        if self.fail_writes {
            return Err(LoggerError::other("memory appender configured to fail"));
        }
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
