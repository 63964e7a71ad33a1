//! A single emitted log line

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One physical line produced by a logging call.
///
/// Multi-line messages are split before they reach an appender, so `message`
/// never contains `'\n'`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    /// Split a message into entries: every trailing `'\n'` is dropped, then
    /// each remaining `'\n'`-separated segment becomes its own entry.
    pub fn split(level: LogLevel, message: &str) -> Vec<LogEntry> {
        let timestamp = Local::now();
        message
            .trim_end_matches('\n')
            .split('\n')
            .map(|line| LogEntry {
                level,
                message: line.to_string(),
                timestamp,
            })
            .collect()
    }

    /// `"<TAG> <message>"`, the form written to standard output.
    pub fn tagged(&self) -> String {
        format!("{} {}", self.level.tag(), self.message)
    }
}
