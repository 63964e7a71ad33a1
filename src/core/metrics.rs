//! Sink metrics
//!
//! Write failures on the logging paths are never reported to the caller.
//! These counters are the only place they become visible.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for lines emitted by a [`LogSink`](crate::LogSink)
///
/// # Example
///
/// ```
/// use logsink::SinkMetrics;
///
/// let metrics = SinkMetrics::new();
/// metrics.record_console_line();
/// metrics.record_file_failure();
///
/// assert_eq!(metrics.console_lines(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug)]
pub struct SinkMetrics {
    console_lines: AtomicU64,
    file_lines: AtomicU64,
    console_failures: AtomicU64,
    file_failures: AtomicU64,
    fatal_aborts: AtomicU64,
}

impl SinkMetrics {
    pub const fn new() -> Self {
        Self {
            console_lines: AtomicU64::new(0),
            file_lines: AtomicU64::new(0),
            console_failures: AtomicU64::new(0),
            file_failures: AtomicU64::new(0),
            fatal_aborts: AtomicU64::new(0),
        }
    }

    /// Lines successfully handed to the console destination
    #[inline]
    pub fn console_lines(&self) -> u64 {
        self.console_lines.load(Ordering::Relaxed)
    }

    /// Lines successfully handed to the file destination
    #[inline]
    pub fn file_lines(&self) -> u64 {
        self.file_lines.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn console_failures(&self) -> u64 {
        self.console_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn file_failures(&self) -> u64 {
        self.file_failures.load(Ordering::Relaxed)
    }

    /// Total swallowed write failures across both destinations
    pub fn write_failures(&self) -> u64 {
        self.console_failures() + self.file_failures()
    }

    #[inline]
    pub fn fatal_aborts(&self) -> u64 {
        self.fatal_aborts.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_console_line(&self) -> u64 {
        self.console_lines.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_line(&self) -> u64 {
        self.file_lines.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_console_failure(&self) -> u64 {
        self.console_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_failure(&self) -> u64 {
        self.file_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_fatal_abort(&self) -> u64 {
        self.fatal_aborts.fetch_add(1, Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.console_lines.store(0, Ordering::Relaxed);
        self.file_lines.store(0, Ordering::Relaxed);
        self.console_failures.store(0, Ordering::Relaxed);
        self.file_failures.store(0, Ordering::Relaxed);
        self.fatal_aborts.store(0, Ordering::Relaxed);
    }
}

impl Default for SinkMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SinkMetrics {
    /// Snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            console_lines: AtomicU64::new(self.console_lines()),
            file_lines: AtomicU64::new(self.file_lines()),
            console_failures: AtomicU64::new(self.console_failures()),
            file_failures: AtomicU64::new(self.file_failures()),
            fatal_aborts: AtomicU64::new(self.fatal_aborts()),
        }
    }
}
