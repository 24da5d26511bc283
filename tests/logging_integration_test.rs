//! Integration tests for the logging sink

use strata::config::{LogLevel, LoggingConfig};
use strata::domain::StrataError;
use strata::logging::init_logging;
use tempfile::TempDir;

fn file_config(dir: &TempDir, level: i64) -> LoggingConfig {
    LoggingConfig {
        level: LogLevel::try_from(level).unwrap(),
        output: Some(dir.path().join("app.log")),
    }
}

fn read_log(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join("app.log")).unwrap()
}

#[test]
fn test_json_output_above_level_zero() {
    let temp_dir = TempDir::new().unwrap();
    let guard = init_logging(&file_config(&temp_dir, 1)).unwrap();

    guard.in_scope(|| {
        let span = tracing::info_span!("startup", phase = "config");
        let _entered = span.enter();
        tracing::info!(answer = 42, "structured event");
    });
    drop(guard);

    let log = read_log(&temp_dir);
    let line = log
        .lines()
        .find(|l| l.contains("structured event"))
        .expect("event should be logged");
    let event: serde_json::Value = serde_json::from_str(line).unwrap();

    assert_eq!(event["level"], "INFO");
    assert_eq!(event["fields"]["answer"], 42);
    assert!(event.get("timestamp").is_some());
    assert!(event.get("filename").is_some());
    assert!(event.get("line_number").is_some());
    assert_eq!(event["span"]["name"], "startup");
}

#[test]
fn test_level_filters_lower_severity() {
    let temp_dir = TempDir::new().unwrap();
    let guard = init_logging(&file_config(&temp_dir, 2)).unwrap();

    guard.in_scope(|| {
        tracing::info!("hidden info");
        tracing::warn!("visible warning");
    });
    drop(guard);

    let log = read_log(&temp_dir);
    assert!(!log.contains("hidden info"));
    assert!(log.contains("visible warning"));
}

#[test]
fn test_level_zero_is_pretty_and_includes_debug() {
    let temp_dir = TempDir::new().unwrap();
    let guard = init_logging(&file_config(&temp_dir, 0)).unwrap();

    guard.in_scope(|| tracing::debug!("pretty debug event"));
    drop(guard);

    let log = read_log(&temp_dir);
    assert!(log.contains("pretty debug event"));
    assert!(serde_json::from_str::<serde_json::Value>(log.lines().next().unwrap()).is_err());
}

#[test]
fn test_log_file_is_appended() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("app.log"), "existing line\n").unwrap();

    let guard = init_logging(&file_config(&temp_dir, 1)).unwrap();
    guard.in_scope(|| tracing::error!("new entry"));
    drop(guard);

    let log = read_log(&temp_dir);
    assert!(log.starts_with("existing line\n"));
    assert!(log.contains("new entry"));
}

#[test]
fn test_unopenable_log_file_does_not_fall_back() {
    let temp_dir = TempDir::new().unwrap();
    let config = LoggingConfig {
        level: LogLevel::DEBUG,
        output: Some(temp_dir.path().to_path_buf()),
    };

    let err = init_logging(&config).unwrap_err();
    assert!(matches!(err, StrataError::Io(_)));
}

#[test]
fn test_events_outside_scope_are_not_captured() {
    let temp_dir = TempDir::new().unwrap();
    let guard = init_logging(&file_config(&temp_dir, 1)).unwrap();

    tracing::error!("outside scope");
    guard.in_scope(|| tracing::error!("inside scope"));
    drop(guard);

    let log = read_log(&temp_dir);
    assert!(!log.contains("outside scope"));
    assert!(log.contains("inside scope"));
}
