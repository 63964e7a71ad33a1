//! Integration tests for the log sink
//!
//! These tests verify:
//! - Log file initialization and directory creation
//! - Line duplication to the log file
//! - Failed initialization leaves the destination untouched
//! - The fatal path and its sentinel
//! - Thread safety

use logsink::appenders::{FileAppender, MemoryAppender};
use logsink::core::fatal::{is_fatal_error, supervise, FatalError};
use logsink::core::sink::LogSink;
use logsink::{error, fatal, info, warn, LoggerError, SinkConfig, TimestampFormat};
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn capturing_sink() -> (LogSink, MemoryAppender) {
    let console = MemoryAppender::new();
    let sink = LogSink::builder()
        .console(console.clone())
        .build()
        .expect("Failed to build sink");
    (sink, console)
}

fn file_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(String::from)
        .collect()
}

/// Strip the `YYYY/MM/DD HH:MM:SS ` prefix of the standard timestamp.
fn without_timestamp(line: &str) -> &str {
    let (date, rest) = line.split_once(' ').expect("date");
    assert_eq!(date.len(), 10, "unexpected date in {:?}", line);
    let (time, rest) = rest.split_once(' ').expect("time");
    assert_eq!(time.len(), 8, "unexpected time in {:?}", line);
    rest
}

#[test]
fn test_set_log_path_creates_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app_dir = temp_dir.path().join("app");
    let log_file = app_dir.join("run.log");
    assert!(!app_dir.exists());

    let (sink, _console) = capturing_sink();
    sink.set_log_path(&log_file).expect("set_log_path");

    assert!(app_dir.is_dir());
    assert!(log_file.is_file());
    assert!(sink.has_log_file());
}

#[test]
fn test_console_line_without_file() {
    let (sink, console) = capturing_sink();
    info!(sink, "user {} logged in", "alice");

    assert_eq!(console.lines(), vec!["[INFO ] user alice logged in"]);
    assert_eq!(sink.metrics().file_lines(), 0);
}

#[test]
fn test_every_line_appended_in_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("run.log");

    let (sink, console) = capturing_sink();
    sink.set_log_path(&log_file).unwrap();

    info!(sink, "starting");
    warn!(sink, "queue at {}%", 90);
    error!(sink, "first\nsecond\n");

    let lines = file_lines(&log_file);
    let stripped: Vec<&str> = lines.iter().map(|l| without_timestamp(l)).collect();
    assert_eq!(
        stripped,
        vec![
            "[INFO ] starting",
            "[WARN ] queue at 90%",
            "[ERROR] first",
            "[ERROR] second",
        ]
    );
    assert_eq!(console.lines(), stripped);
}

#[test]
fn test_reopen_appends_to_existing_content() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("run.log");

    {
        let (sink, _) = capturing_sink();
        sink.set_log_path(&log_file).unwrap();
        sink.info("first run");
    }
    let (sink, _) = capturing_sink();
    sink.set_log_path(&log_file).unwrap();
    sink.info("second run");

    let lines = file_lines(&log_file);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("[INFO ] first run"));
    assert!(lines[1].ends_with("[INFO ] second run"));
}

#[test]
fn test_switching_log_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let first = temp_dir.path().join("first.log");
    let second = temp_dir.path().join("second.log");

    let (sink, _) = capturing_sink();
    sink.set_log_path(&first).unwrap();
    sink.info("to first");
    sink.set_log_path(&second).unwrap();
    sink.info("to second");

    assert_eq!(file_lines(&first).len(), 1);
    assert_eq!(file_lines(&second).len(), 1);
    assert!(file_lines(&second)[0].ends_with("to second"));
}

#[test]
fn test_failed_init_keeps_previous_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let good = temp_dir.path().join("good.log");
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let (sink, _) = capturing_sink();
    sink.set_log_path(&good).unwrap();

    let err = sink
        .set_log_path(blocker.join("nested").join("run.log"))
        .expect_err("parent is a regular file");
    assert!(matches!(err, LoggerError::IoOperation { .. }));
    assert!(err.io_error().is_some());

    sink.info("after failure");
    let lines = file_lines(&good);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("[INFO ] after failure"));
}

#[test]
fn test_failed_init_without_previous_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let (sink, console) = capturing_sink();
    assert!(sink.set_log_path(blocker.join("run.log")).is_err());
    assert!(!sink.has_log_file());
    assert!(console.is_empty());
}

#[test]
fn test_fatal_writes_message_and_frames_to_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("fatal.log");

    let (sink, console) = capturing_sink();
    sink.set_log_path(&log_file).unwrap();

    let payload = panic::catch_unwind(AssertUnwindSafe(|| {
        fatal!(sink, "cannot open {}", "db.sqlite");
    }))
    .expect_err("fatal never returns");
    assert!(is_fatal_error(&*payload));

    let lines = file_lines(&log_file);
    assert_eq!(without_timestamp(&lines[0]), "[FATAL] cannot open db.sqlite");
    assert_eq!(lines.len(), console.len());
    assert_eq!((lines.len() - 1) % 2, 0);
    assert!(lines.iter().all(|l| without_timestamp(l).starts_with("[FATAL] ")));
}

#[inline(never)]
fn abort_from_named_caller(sink: &LogSink) {
    sink.fatal("named caller");
}

#[test]
fn test_fatal_reports_caller_first() {
    let (sink, console) = capturing_sink();
    let _ = panic::catch_unwind(AssertUnwindSafe(|| abort_from_named_caller(&sink)));

    let lines = console.lines();
    assert_eq!(lines[0], "[FATAL] named caller");
    assert!(
        lines.iter().all(|l| !l.contains("LogSink::fatal")),
        "fatal frame leaked into report: {:#?}",
        lines
    );
    assert!(
        lines.iter().all(|l| !l.contains("capture_caller_frames")),
        "capture frame leaked into report: {:#?}",
        lines
    );
    if cfg!(debug_assertions) {
        assert!(lines.len() >= 3, "no frames captured: {:#?}", lines);
        assert!(
            lines[1].contains("abort_from_named_caller"),
            "first frame should be the caller: {:#?}",
            lines
        );
    }
}

/// An application-side wrapper whose name ends in `LogSink`.
struct AppLogSink {
    inner: LogSink,
}

impl AppLogSink {
    #[inline(never)]
    fn fatal(&self, message: &str) -> ! {
        self.inner.fatal(message)
    }
}

#[inline(never)]
fn abort_through_wrapper(sink: &AppLogSink) {
    sink.fatal("wrapped");
}

#[test]
fn test_fatal_keeps_wrapper_frame() {
    let console = MemoryAppender::new();
    let sink = AppLogSink {
        inner: LogSink::builder().console(console.clone()).build().unwrap(),
    };
    let _ = panic::catch_unwind(AssertUnwindSafe(|| abort_through_wrapper(&sink)));

    let lines = console.lines();
    assert_eq!(lines[0], "[FATAL] wrapped");

    if cfg!(debug_assertions) {
        assert!(lines.len() >= 5, "frames missing: {:#?}", lines);
        assert!(
            lines[1].contains("AppLogSink::fatal"),
            "first frame should be the wrapper: {:#?}",
            lines
        );
        assert!(
            lines[3].contains("abort_through_wrapper"),
            "second frame should be the wrapper's caller: {:#?}",
            lines
        );
    }
}

#[test]
fn test_supervise_converts_fatal() {
    let (sink, _) = capturing_sink();
    let result = supervise(|| sink.fatal("stop"));
    match result {
        Err(err) => {
            assert!(err.is_fatal());
            assert!(logsink::is_fatal_error_value(&err));
        }
        Ok(()) => panic!("fatal returned normally"),
    }
}

#[test]
fn test_predicate_on_non_fatal_payloads() {
    let payload = panic::catch_unwind(|| panic!("plain panic")).unwrap_err();
    assert!(!is_fatal_error(&*payload));

    let payload = panic::catch_unwind(|| panic::panic_any(FatalError)).unwrap_err();
    assert!(is_fatal_error(&*payload));

    let io: Box<dyn std::error::Error + Send + Sync> =
        Box::new(std::io::Error::other("disk gone"));
    let payload = panic::catch_unwind(AssertUnwindSafe(|| panic::panic_any(io))).unwrap_err();
    assert!(!is_fatal_error(&*payload));
}

#[test]
fn test_from_config_with_log_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("cfg").join("run.log");
    let config = SinkConfig::new()
        .with_log_path(&log_file)
        .with_timestamp_format(TimestampFormat::Custom("%Y".to_string()));

    let sink = LogSink::from_config(&config).expect("sink from config");
    sink.warn("configured");

    let lines = file_lines(&log_file);
    assert_eq!(lines.len(), 1);
    let (year, rest) = lines[0].split_once(' ').unwrap();
    assert_eq!(year.len(), 4);
    assert_eq!(rest, "[WARN ] configured");
}

#[test]
fn test_file_appender_injected_through_builder() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("direct.log");
    let appender = FileAppender::new(&log_file)
        .unwrap()
        .with_timestamp_format(TimestampFormat::Unix);

    let sink = LogSink::builder()
        .console(MemoryAppender::new())
        .file_appender(appender)
        .build()
        .unwrap();
    sink.error("direct");

    let lines = file_lines(&log_file);
    assert!(lines[0].ends_with(" [ERROR] direct"));
}

#[test]
fn test_thread_safety() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("threads.log");

    let (sink, console) = capturing_sink();
    sink.set_log_path(&log_file).unwrap();
    let sink = Arc::new(sink);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                for i in 0..25 {
                    info!(sink, "thread {} message {}\ncontinued", t, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let lines = file_lines(&log_file);
    assert_eq!(lines.len(), 8 * 25 * 2);
    assert_eq!(console.len(), 8 * 25 * 2);

    // the two lines of one call stay adjacent
    for pair in lines.chunks(2) {
        assert!(without_timestamp(&pair[0]).starts_with("[INFO ] thread "));
        assert_eq!(without_timestamp(&pair[1]), "[INFO ] continued");
    }
}
