//! Fatal abort support
//!
//! [`LogSink::fatal`](crate::LogSink::fatal) logs the message and the caller's
//! stack, then unwinds with a [`FatalError`] payload. A supervisor boundary
//! (see [`supervise`]) or any `catch_unwind` site can recognise that payload
//! with [`is_fatal_error`].
//!
//! Stack capture is best-effort: inlining and stripped debug info can hide
//! frames or their locations.

use super::error::{LoggerError, Result};
use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Upper bound on frames reported by the fatal path.
pub const MAX_FATAL_FRAMES: usize = 100;

const UNKNOWN: &str = "<unknown>";

/// Sentinel carried by every unwind that originates from the fatal path.
///
/// Identity is by type, never by message text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, thiserror::Error)]
#[error("fatal error")]
pub struct FatalError;

/// One resolved call-stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub function: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n    {}:{}",
            self.function,
            self.file.as_deref().unwrap_or(UNKNOWN),
            self.line.unwrap_or(0)
        )
    }
}

/// Capture up to `limit` frames outward from the caller of `boundary`.
///
/// `boundary` is the path suffix of the function whose frame (and everything
/// inside it) is excluded, e.g. `"LogSink::fatal"`. When no frame matches the
/// boundary, only the capture machinery itself is skipped.
#[inline(never)]
pub fn capture_caller_frames(boundary: &str, limit: usize) -> Vec<StackFrame> {
    let trace = backtrace::Backtrace::new();
    let frames: Vec<StackFrame> = trace
        .frames()
        .iter()
        .flat_map(|frame| {
            let symbols = frame.symbols();
            if symbols.is_empty() {
                return vec![StackFrame {
                    function: UNKNOWN.to_string(),
                    file: None,
                    line: None,
                }];
            }
            symbols
                .iter()
                .map(|symbol| StackFrame {
                    function: symbol
                        .name()
                        .map(|name| format!("{:#}", name))
                        .unwrap_or_else(|| UNKNOWN.to_string()),
                    file: symbol.filename().map(|path| path.display().to_string()),
                    line: symbol.lineno(),
                })
                .collect()
        })
        .collect();

    // innermost boundary frame, plus any frames of it nested directly outside
    let start = match frames
        .iter()
        .position(|f| matches_boundary(&f.function, boundary))
    {
        Some(idx) => {
            idx + frames[idx..]
                .iter()
                .take_while(|f| matches_boundary(&f.function, boundary))
                .count()
        }
        None => frames
            .iter()
            .rposition(|f| {
                f.function.starts_with("backtrace::")
                    || f.function.contains("capture_caller_frames")
            })
            .map_or(0, |idx| idx + 1),
    };

    frames.into_iter().skip(start).take(limit).collect()
}

/// `boundary` itself, or anything nested under it (closures, generic
/// instances). The match must start at a path segment, so `AppLogSink::fatal`
/// is not `LogSink::fatal`. Angle brackets from qualified paths such as
/// `<T>::method` are ignored.
fn matches_boundary(function: &str, boundary: &str) -> bool {
    let plain: String = function.chars().filter(|c| *c != '<' && *c != '>').collect();
    plain.match_indices(boundary).any(|(idx, _)| {
        let rest = &plain[idx + boundary.len()..];
        let at_segment = idx == 0 || plain[..idx].ends_with("::");
        at_segment && (rest.is_empty() || rest.starts_with("::"))
    })
}

/// Whether a caught panic payload is, or wraps, the fatal sentinel.
///
/// Recognises a bare [`FatalError`], a [`LoggerError`], and boxed
/// `dyn Error` payloads whose source chain reaches a `FatalError`. Any other
/// payload, such as the `&str`/`String` of an ordinary `panic!`, is not fatal.
pub fn is_fatal_error(payload: &(dyn Any + Send)) -> bool {
    if payload.is::<FatalError>() {
        return true;
    }
    if let Some(err) = payload.downcast_ref::<LoggerError>() {
        return is_fatal_error_value(err);
    }
    if let Some(err) = payload.downcast_ref::<Box<dyn Error + Send + Sync>>() {
        return is_fatal_error_value(err.as_ref());
    }
    if let Some(err) = payload.downcast_ref::<Box<dyn Error + Send>>() {
        return is_fatal_error_value(err.as_ref());
    }
    false
}

/// Walk `err` and its sources looking for [`FatalError`].
pub fn is_fatal_error_value(err: &(dyn Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<FatalError>() {
            return true;
        }
        current = e.source();
    }
    false
}

/// Run `f`, turning a fatal abort into `Err(LoggerError::Fatal)`.
///
/// Any other panic continues unwinding unchanged. State touched by `f` is
/// treated as unwind safe, as at any top-level boundary.
///
/// # Example
///
/// ```
/// use logsink::{supervise, LogSink, MemoryAppender};
///
/// let sink = LogSink::builder().console(MemoryAppender::new()).build().unwrap();
/// let result = supervise(|| sink.fatal("cannot continue"));
/// assert!(result.unwrap_err().is_fatal());
/// ```
pub fn supervise<F, R>(f: F) -> Result<R>
where
    F: FnOnce() -> R,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) if is_fatal_error(&*payload) => Err(LoggerError::Fatal(FatalError)),
        Err(payload) => panic::resume_unwind(payload),
    }
}
