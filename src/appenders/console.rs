//! Console appender implementation

use crate::core::{Appender, LogEntry, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Writes `"<TAG> <line>"` to standard output. No timestamp.
pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: false }
    }

    /// Colorize the level tag. Has no effect without the `console` feature.
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    #[cfg(feature = "console")]
    fn format_line(&self, entry: &LogEntry) -> String {
        if self.use_colors {
            format!(
                "{} {}",
                entry.level.tag().color(entry.level.color_code()),
                entry.message
            )
        } else {
            entry.tagged()
        }
    }

    #[cfg(not(feature = "console"))]
    fn format_line(&self, entry: &LogEntry) -> String {
        entry.tagged()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.format_line(entry);
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
