//! # logsink
//!
//! Leveled logging to standard output with an optional append-mode log file,
//! plus a fatal path that logs the caller's stack and aborts by unwinding.
//!
//! ## Features
//!
//! - **Leveled output**: `[INFO ]`, `[WARN ]`, `[ERROR]` and `[FATAL]` tags
//! - **File copy**: every line duplicated to a timestamped log file once one is set
//! - **Fatal abort**: stack capture followed by an unwind recognisable with
//!   [`is_fatal_error`]
//! - **Injectable destinations**: tests swap in a [`MemoryAppender`]
//!
//! ## Example
//!
//! ```
//! use logsink::prelude::*;
//! use logsink::info;
//!
//! let capture = MemoryAppender::new();
//! let sink = LogSink::builder().console(capture.clone()).build()?;
//!
//! info!(sink, "user {} logged in", "alice");
//! assert_eq!(capture.lines(), vec!["[INFO ] user alice logged in"]);
//! # Ok::<(), logsink::LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender};
    pub use crate::core::{
        is_fatal_error, supervise, Appender, FatalError, LogEntry, LogLevel, LogSink,
        LogSinkBuilder, LoggerError, Result, SinkConfig, SinkMetrics, TimestampFormat,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, MemoryAppender};
pub use core::{
    capture_caller_frames, is_fatal_error, is_fatal_error_value, supervise, Appender,
    FatalError, LogEntry, LogLevel, LogSink, LogSinkBuilder, LoggerError, Result, SinkConfig,
    SinkMetrics, StackFrame, TimestampFormat, MAX_FATAL_FRAMES,
};
