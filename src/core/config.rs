//! Sink configuration

use super::error::{LoggerError, Result};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Declarative settings for building a [`LogSink`](crate::LogSink)
///
/// # Example
///
/// ```
/// use logsink::SinkConfig;
///
/// let config = SinkConfig::from_json_str(r#"{ "timestamp_format": "Rfc3339" }"#).unwrap();
/// assert!(config.log_path.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SinkConfig {
    /// File that receives a copy of every line, if any
    pub log_path: Option<PathBuf>,
    /// Prefix format for file lines
    pub timestamp_format: TimestampFormat,
    /// Colorize the level tag on stdout
    pub console_colors: bool,
}

impl SinkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_console_colors(mut self, enabled: bool) -> Self {
        self.console_colors = enabled;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SinkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("reading sink config", path.display().to_string(), e)
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.log_path {
            if path.as_os_str().is_empty() {
                return Err(LoggerError::config("SinkConfig", "log_path must not be empty"));
            }
        }
        if let TimestampFormat::Custom(format) = &self.timestamp_format {
            if format.is_empty() {
                return Err(LoggerError::config(
                    "SinkConfig",
                    "custom timestamp format must not be empty",
                ));
            }
        }
        Ok(())
    }
}
