//! Logging macros
//!
//! With only a message, the message is logged verbatim: brace sequences such
//! as `{}` or `{name}` are not interpreted. With one or more arguments the
//! message is a `format!` string.
//!
//! # Examples
//!
//! ```
//! use logsink::prelude::*;
//! use logsink::{info, warn};
//!
//! let capture = MemoryAppender::new();
//! let sink = LogSink::builder().console(capture.clone()).build().unwrap();
//!
//! info!(sink, "user {} logged in", "alice");
//! warn!(sink, "progress at 100% {}");
//!
//! assert_eq!(
//!     capture.lines(),
//!     vec!["[INFO ] user alice logged in", "[WARN ] progress at 100% {}"]
//! );
//! ```

/// Log at an explicit level.
#[macro_export]
macro_rules! log {
    ($sink:expr, $level:expr, $msg:expr $(,)?) => {
        $sink.log($level, $msg)
    };
    ($sink:expr, $level:expr, $fmt:expr, $($arg:tt)+) => {
        $sink.log($level, format!($fmt, $($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($sink:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($sink:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($sink:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal message with the caller's stack, then abort by unwinding.
///
/// ```
/// use logsink::prelude::*;
/// use logsink::fatal;
///
/// let sink = LogSink::builder().console(MemoryAppender::new()).build().unwrap();
/// let result = supervise(|| fatal!(sink, "unrecoverable: {}", "disk full"));
/// assert!(result.is_err());
/// ```
#[macro_export]
macro_rules! fatal {
    ($sink:expr, $msg:expr $(,)?) => {
        $sink.fatal($msg)
    };
    ($sink:expr, $fmt:expr, $($arg:tt)+) => {
        $sink.fatal(format!($fmt, $($arg)+))
    };
}
