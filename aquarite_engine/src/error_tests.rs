//! Unit tests for error.rs
//!
//! Tests Display output, the Result alias and the engine_err!/engine_bail! macros.

use crate::error::{Error, Result};
use crate::log::{self, Logger, LogEntry, LogSeverity};
use serial_test::serial;
use std::sync::{Arc, Mutex};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_geometry_display() {
    let err = Error::InvalidGeometry("collinear points".to_string());
    assert_eq!(format!("{}", err), "Invalid geometry: collinear points");
}

#[test]
fn test_invalid_state_display() {
    let err = Error::InvalidState("frustum not defined".to_string());
    assert_eq!(format!("{}", err), "Invalid state: frustum not defined");
}

#[test]
fn test_invalid_hierarchy_display() {
    let err = Error::InvalidHierarchy("cycle".to_string());
    assert_eq!(format!("{}", err), "Invalid hierarchy: cycle");
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("Model 'crate' already exists".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("'crate'"));
}

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("draw_triangles failed".to_string());
    assert_eq!(format!("{}", err), "Backend error: draw_triangles failed");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidState("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug_names_variant() {
    assert!(format!("{:?}", Error::InvalidGeometry("g".into())).contains("InvalidGeometry"));
    assert!(format!("{:?}", Error::InvalidHierarchy("h".into())).contains("InvalidHierarchy"));
}

#[test]
fn test_error_clone_and_eq() {
    let err = Error::InvalidResource("res".to_string());
    assert_eq!(err.clone(), err);
    assert_ne!(err, Error::InvalidState("res".to_string()));
}

// ============================================================================
// RESULT / PROPAGATION TESTS
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::InvalidState("not ready".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert_eq!(outer(), Err(Error::InvalidState("not ready".to_string())));
}

// ============================================================================
// MACRO TESTS
// ============================================================================

struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn capture() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    log::set_logger(CaptureLogger { entries: entries.clone() });
    entries
}

#[test]
#[serial]
fn test_engine_err_builds_variant_and_logs_error() {
    let entries = capture();

    let err = crate::engine_err!(InvalidHierarchy, "aquarite::ErrorTest", "entity {} missing", 7);
    log::reset_logger();

    assert_eq!(err, Error::InvalidHierarchy("entity 7 missing".to_string()));

    let entries = entries.lock().unwrap();
    let entry = entries
        .iter()
        .find(|e| e.source == "aquarite::ErrorTest")
        .expect("error was not logged");
    assert_eq!(entry.severity, LogSeverity::Error);
    assert_eq!(entry.message, "entity 7 missing");
    assert!(entry.file.is_some());
    assert!(entry.line.is_some());
}

#[test]
#[serial]
fn test_engine_bail_returns_early() {
    fn check(value: i32) -> Result<i32> {
        if value < 0 {
            crate::engine_bail!(InvalidGeometry, "aquarite::ErrorTest", "negative: {}", value);
        }
        Ok(value * 2)
    }

    let _entries = capture();
    let bad = check(-1);
    let good = check(4);
    log::reset_logger();

    assert_eq!(bad, Err(Error::InvalidGeometry("negative: -1".to_string())));
    assert_eq!(good, Ok(8));
}
