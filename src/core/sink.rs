//! The log sink: leveled writes to the console and an optional file

use super::{
    appender::Appender,
    config::SinkConfig,
    error::Result,
    fatal::{capture_caller_frames, FatalError, MAX_FATAL_FRAMES},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::SinkMetrics,
    timestamp::TimestampFormat,
};
use crate::appenders::{ConsoleAppender, FileAppender};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Frames belonging to this function and everything it calls are left out of
/// the fatal stack report.
const FATAL_BOUNDARY: &str = "LogSink::fatal";

/// Shared logging handle
///
/// Construct one early, before logging from several threads, and pass it by
/// reference. Every line goes to the console destination; once a file
/// destination is attached, each line is copied there too.
///
/// Write failures are swallowed. They only show up in [`LogSink::metrics`].
pub struct LogSink {
    console: Mutex<Box<dyn Appender>>,
    file: Mutex<Option<Box<dyn Appender>>>,
    timestamp_format: TimestampFormat,
    metrics: SinkMetrics,
}

impl LogSink {
    /// A sink that writes to stdout only.
    #[must_use]
    pub fn new() -> Self {
        Self::with_console(Box::new(ConsoleAppender::new()))
    }

    #[must_use]
    pub fn with_console(console: Box<dyn Appender>) -> Self {
        Self {
            console: Mutex::new(console),
            file: Mutex::new(None),
            timestamp_format: TimestampFormat::default(),
            metrics: SinkMetrics::new(),
        }
    }

    #[must_use]
    pub fn builder() -> LogSinkBuilder {
        LogSinkBuilder::new()
    }

    pub fn from_config(config: &SinkConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = LogSinkBuilder::new()
            .timestamp_format(config.timestamp_format.clone())
            .colors(config.console_colors);
        if let Some(path) = &config.log_path {
            builder = builder.log_path(path);
        }
        builder.build()
    }

    /// Attach `path` as the file destination.
    ///
    /// Missing parent directories are created (mode 0755 on Unix) and the file
    /// is opened for appending (created with mode 0644 if absent). On failure
    /// the error is returned and the current file destination, if any, stays
    /// in place. On success the previous destination is replaced.
    pub fn set_log_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let appender =
            FileAppender::new(path.as_ref())?.with_timestamp_format(self.timestamp_format.clone());
        self.set_file_appender(Box::new(appender));
        Ok(())
    }

    /// Replace the file destination with an arbitrary appender.
    pub fn set_file_appender(&self, appender: Box<dyn Appender>) {
        *self.file.lock() = Some(appender);
    }

    /// Detach the file destination. Later lines go to the console only.
    pub fn clear_log_path(&self) {
        *self.file.lock() = None;
    }

    pub fn has_log_file(&self) -> bool {
        self.file.lock().is_some()
    }

    /// Emit `message` verbatim at `level`.
    ///
    /// Trailing newlines are dropped and every remaining line is tagged and
    /// written separately. `LogLevel::Fatal` only tags the lines; use
    /// [`LogSink::fatal`] to abort.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let entries = LogEntry::split(level, message.as_ref());
        let mut console = self.console.lock();
        let mut file = self.file.lock();

        for entry in &entries {
            match console.append(entry) {
                Ok(()) => {
                    self.metrics.record_console_line();
                }
                Err(_) => {
                    self.metrics.record_console_failure();
                }
            }

            if let Some(file) = file.as_mut() {
                match file.append(entry) {
                    Ok(()) => {
                        self.metrics.record_file_line();
                    }
                    Err(_) => {
                        self.metrics.record_file_failure();
                    }
                }
            }
        }
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    /// Log `message` and the caller's stack at `[FATAL]`, then unwind with
    /// [`FatalError`].
    ///
    /// Each frame is reported innermost first as `function` followed by an
    /// indented `file:line` line, at most [`MAX_FATAL_FRAMES`] of them. The
    /// unwind terminates the thread unless caught, for example by
    /// [`supervise`](crate::supervise).
    #[inline(never)]
    pub fn fatal(&self, message: impl AsRef<str>) -> ! {
        self.log(LogLevel::Fatal, message);
        for frame in capture_caller_frames(FATAL_BOUNDARY, MAX_FATAL_FRAMES) {
            self.log(LogLevel::Fatal, frame.to_string());
        }
        self.metrics.record_fatal_abort();
        let _ = self.flush();
        std::panic::panic_any(FatalError)
    }

    pub fn flush(&self) -> Result<()> {
        self.console.lock().flush()?;
        if let Some(file) = self.file.lock().as_mut() {
            file.flush()?;
        }
        Ok(())
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Builder for constructing a [`LogSink`] with a fluent API
///
/// # Example
/// ```
/// use logsink::prelude::*;
///
/// let capture = MemoryAppender::new();
/// let sink = LogSink::builder()
///     .console(capture.clone())
///     .timestamp_format(TimestampFormat::Rfc3339)
///     .build()
///     .unwrap();
///
/// sink.warn("low disk");
/// assert_eq!(capture.lines(), vec!["[WARN ] low disk"]);
/// ```
pub struct LogSinkBuilder {
    console: Option<Box<dyn Appender>>,
    file: Option<Box<dyn Appender>>,
    log_path: Option<PathBuf>,
    timestamp_format: TimestampFormat,
    colors: bool,
}

impl LogSinkBuilder {
    pub fn new() -> Self {
        Self {
            console: None,
            file: None,
            log_path: None,
            timestamp_format: TimestampFormat::default(),
            colors: false,
        }
    }

    /// Replace the stdout destination
    #[must_use = "builder methods return a new value"]
    pub fn console<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.console = Some(Box::new(appender));
        self
    }

    /// Install a file destination directly; `log_path` takes precedence
    #[must_use = "builder methods return a new value"]
    pub fn file_appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.file = Some(Box::new(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Timestamp prefix for file lines, also applied by later `set_log_path` calls
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Colorize tags on the default stdout destination
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    /// Build the sink, opening `log_path` if one was given.
    pub fn build(self) -> Result<LogSink> {
        let console = self
            .console
            .unwrap_or_else(|| Box::new(ConsoleAppender::with_colors(self.colors)));

        let mut sink = LogSink::with_console(console);
        sink.timestamp_format = self.timestamp_format;

        if let Some(file) = self.file {
            sink.set_file_appender(file);
        }
        if let Some(path) = self.log_path {
            sink.set_log_path(path)?;
        }
        Ok(sink)
    }
}

impl Default for LogSinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
