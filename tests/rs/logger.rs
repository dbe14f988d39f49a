//! Integration tests for logger behavior.

use gradebook::logger::{set_level, set_level_from_str, Level};
use gradebook::{debug, error, info, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_writes_records() {
    use gradebook::logger::init_file_logging;

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("logs").join("gradebook.log");

    assert!(init_file_logging(&path));
    // error records pass at every level
    error!("score rejected for student 7");

    let content = std::fs::read_to_string(&path).expect("Failed to read log file");
    assert!(content.contains("[ERROR] score rejected for student 7"));
}
