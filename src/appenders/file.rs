//! File appender implementation

use crate::core::{Appender, LogEntry, LoggerError, Result, TimestampFormat};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
const DIR_MODE: u32 = 0o755;
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Appends `"<timestamp> <TAG> <line>"` to a file.
///
/// Each line is written straight through to the file, so a line is on disk
/// once `append` returns.
pub struct FileAppender {
    file: File,
    path: PathBuf,
    timestamp_format: TimestampFormat,
}

impl FileAppender {
    /// Open `path` for appending, creating it and any missing parent
    /// directories first.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use logsink::FileAppender;
    ///
    /// let appender = FileAppender::new("/tmp/app/run.log").unwrap();
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_parent_dir(&path)?;
        let file = open_append(&path).map_err(|e| {
            LoggerError::io_operation("opening log file", path.display().to_string(), e)
        })?;

        Ok(Self {
            file,
            path,
            timestamp_format: TimestampFormat::default(),
        })
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format_line(&self, entry: &LogEntry) -> String {
        format!(
            "{} {}\n",
            self.timestamp_format.format(&entry.timestamp),
            entry.tagged()
        )
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => return Ok(()),
    };
    if dir.exists() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir).map_err(|e| {
        LoggerError::io_operation("creating log directory", dir.display().to_string(), e)
    })
}

fn open_append(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path)
}

impl Appender for FileAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let output = self.format_line(entry);
        self.file.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
