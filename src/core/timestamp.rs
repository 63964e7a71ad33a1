//! Timestamp formatting for file output

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp prefix written in front of every file line
///
/// # Examples
///
/// ```
/// use logsink::TimestampFormat;
/// use chrono::Local;
///
/// let stamp = TimestampFormat::Standard.format(&Local::now());
/// assert_eq!(stamp.len(), "2025/01/08 10:30:45".len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local date and time to the second: `2025/01/08 10:30:45`
    #[default]
    Standard,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123`
    Iso8601,

    /// RFC 3339 with offset: `2025-01-08T10:30:45+01:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        match self {
            TimestampFormat::Standard => datetime.format("%Y/%m/%d %H:%M:%S").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::Custom(format_str) => {
                // an invalid strftime string is written out as-is
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => format_str.clone(),
                }
            }
        }
    }
}
