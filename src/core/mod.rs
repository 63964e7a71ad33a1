//! Core sink types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod fatal;
pub mod log_entry;
pub mod log_level;
pub mod metrics;
pub mod sink;
pub mod timestamp;

pub use appender::Appender;
pub use config::SinkConfig;
pub use error::{LoggerError, Result};
pub use fatal::{
    capture_caller_frames, is_fatal_error, is_fatal_error_value, supervise, FatalError,
    StackFrame, MAX_FATAL_FRAMES,
};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use metrics::SinkMetrics;
pub use sink::{LogSink, LogSinkBuilder};
pub use timestamp::TimestampFormat;
