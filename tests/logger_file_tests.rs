use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use pipelog::{
    AuditData, Level, Log, LogConfig, Logger, apply_function_name, apply_trace_id,
    default_trace_id, generate_trace_id,
};

fn today() -> String {
    let format = time::format_description::parse("[year]-[month]-[day]").unwrap();
    time::OffsetDateTime::now_utc().format(&format).unwrap()
}

fn logger(dir: &Path) -> Logger {
    Logger::new(
        LogConfig::new("hostname", "test", "test-app")
            .with_level(Level::Info)
            .with_directory(dir),
    )
    .expect("logger")
}

/// Drop the logger to flush the non-blocking worker, then read the day file.
fn read_raw(logger: Logger, dir: &Path) -> String {
    drop(logger);
    std::thread::sleep(Duration::from_millis(100));
    fs::read_to_string(dir.join(format!("log.{}", today()))).expect("log file")
}

fn read_lines(logger: Logger, dir: &Path) -> Vec<Vec<String>> {
    read_raw(logger, dir)
        .lines()
        .map(|line| line.split('|').map(str::to_string).collect())
        .collect()
}

fn read_fields(logger: Logger, dir: &Path) -> Vec<String> {
    let mut lines = read_lines(logger, dir);
    assert_eq!(lines.len(), 1, "expected exactly one log line");
    lines.remove(0)
}

struct SystemError(&'static str);

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

struct SilentError;

impl fmt::Display for SilentError {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

#[test]
fn logs_something() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());
    logger.info(Some("trace2"), "fn2", "mess2");

    let fields = read_fields(logger, dir.path());
    assert!(fields[0].contains(&today()));
    assert_eq!(
        fields[1..],
        ["test", "hostname", "0", "trace2", "test-app", "info", "fn2", "mess2"]
    );
}

#[test]
fn logs_default_trace_id() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());
    logger.info(None, "function-2", "my message");

    let fields = read_fields(logger, dir.path());
    assert_eq!(fields[4], "00000000-0000-0000-0000-000000000000");
}

#[test]
fn does_not_log_debug_when_level_is_info() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());
    logger.debug(None, "function-2", "my message");

    assert!(read_raw(logger, dir.path()).is_empty());
}

#[test]
fn logs_error_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());
    logger.error(
        Some("tr1"),
        "function-2",
        "my message",
        &SystemError("System threw error"),
    );

    let fields = read_fields(logger, dir.path());
    assert_eq!(
        fields[1..],
        [
            "test",
            "hostname",
            "0",
            "tr1",
            "test-app",
            "error",
            "function-2",
            "my message [System threw error]"
        ]
    );
}

#[test]
fn renders_empty_brackets_when_error_has_no_message() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());
    logger.error(Some("tr1"), "function-2", "my message", &SilentError);

    let fields = read_fields(logger, dir.path());
    assert_eq!(fields[8], "my message []");
}

#[test]
fn logs_composed() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());
    apply_function_name("fn2", &apply_trace_id(Some("tr2"), &logger)).info("message 2");

    let fields = read_fields(logger, dir.path());
    assert_eq!(
        fields[1..],
        ["test", "hostname", "0", "tr2", "test-app", "info", "fn2", "message 2"]
    );
}

#[test]
fn composed_line_matches_direct_call() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());

    logger.info(Some("tr2"), "fn2", "message 2");
    apply_function_name("fn2", &apply_trace_id(Some("tr2"), &logger)).info("message 2");

    let lines = read_lines(logger, dir.path());
    assert_eq!(lines.len(), 2);
    // Identical apart from the timestamp field.
    assert_eq!(lines[0][1..], lines[1][1..]);
}

#[test]
fn logs_with_generated_trace_id() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());
    logger.info(Some(&generate_trace_id()), "function-2", "my message");

    let fields = read_fields(logger, dir.path());
    assert!(!fields[4].is_empty());
    assert_ne!(fields[4], default_trace_id());
}

#[test]
fn logs_audit_with_data_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());
    let data = AuditData::from(serde_json::json!({"count": 5}));
    logger.audit(Some("traceid"), "user", "x", "logs in", Some(&data));

    let fields = read_fields(logger, dir.path());
    assert_eq!(
        fields[1..],
        [
            "test",
            "hostname",
            "0",
            "traceid",
            "test-app",
            "audit",
            "user",
            "x",
            "logs in",
            "{\"count\":5}"
        ]
    );
}

#[test]
fn logs_audit_with_data_as_string() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());
    let data = AuditData::from("data: 5");
    logger.audit(Some("traceid"), "user", "John Snow", "logs in", Some(&data));

    let fields = read_fields(logger, dir.path());
    assert_eq!(fields[10], "data: 5");
}

#[test]
fn logs_audit_with_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());
    logger.audit(Some("traceid"), "user", "John Snow", "logs in", None);

    let fields = read_fields(logger, dir.path());
    assert_eq!(
        fields[1..],
        [
            "test",
            "hostname",
            "0",
            "traceid",
            "test-app",
            "audit",
            "user",
            "John Snow",
            "logs in"
        ]
    );
}

#[test]
fn logs_audit_when_debug_level_is_selected() {
    let dir = tempfile::tempdir().unwrap();
    let logger = Logger::new(
        LogConfig::new("hostname", "test", "test-app")
            .with_level(Level::Debug)
            .with_directory(dir.path()),
    )
    .unwrap();
    logger.audit(Some("trace2"), "user", "John Snow", "message", Some(&AuditData::from("mess2")));

    let fields = read_fields(logger, dir.path());
    assert!(fields[0].contains(&today()));
    assert_eq!(fields[6], "audit");
    assert_eq!(fields[10], "mess2");
}

#[test]
fn logs_audit_when_info_level_is_selected() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());
    logger.audit(Some("trace2"), "user", "John Snow", "message", Some(&AuditData::from("mess2")));

    let fields = read_fields(logger, dir.path());
    assert_eq!(fields[6], "audit");
    assert_eq!(fields[10], "mess2");
}

#[test]
fn does_not_create_file_when_directory_is_not_configured() {
    let dir = tempfile::tempdir().unwrap();
    let logger =
        Logger::new(LogConfig::new("hostname", "test", "test-app").with_level(Level::Info))
            .unwrap();
    logger.info(Some("trace"), "fn", "message");
    drop(logger);

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert!(entries.is_empty());
}

#[test]
fn creates_file_when_directory_is_configured() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("logs");
    let logger = logger(&target);
    logger.info(Some("trace"), "fn", "message");
    drop(logger);

    assert!(target.exists());
}

#[test]
fn creates_file_with_configured_name() {
    let dir = tempfile::tempdir().unwrap();
    let logger = Logger::new(
        LogConfig::new("hostname", "test", "test-app")
            .with_level(Level::Info)
            .with_directory(dir.path())
            .with_file_name("abcdef.log"),
    )
    .unwrap();
    logger.info(Some("trace"), "fn", "message");
    drop(logger);
    std::thread::sleep(Duration::from_millis(100));

    let found = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_name().to_string_lossy().starts_with("abcdef.log"));
    assert!(found);
}

#[test]
fn creates_file_with_default_name() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());
    logger.info(Some("trace"), "fn", "message");
    drop(logger);
    std::thread::sleep(Duration::from_millis(100));

    let found = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_name().to_string_lossy().starts_with("log."));
    assert!(found);
}

#[test]
fn one_file_per_day_with_expected_name() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logger(dir.path());
    logger.info(Some("a"), "fn", "first");
    logger.warn(Some("b"), "fn", "second");
    drop(logger);
    std::thread::sleep(Duration::from_millis(100));

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec![format!("log.{}", today())]);
}
