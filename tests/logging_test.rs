//! Tests for the injected log sinks

mod common;

use common::{chunk, material_list};
use libmsh::{Document, LogSink, NullSink, ParserConfig, Severity, TracingSink};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorder(Mutex<Vec<Severity>>);

impl LogSink for Recorder {
    fn log(&self, _message: &str, severity: Severity) {
        self.0.lock().unwrap().push(severity);
    }
}

#[test]
fn test_tracing_sink_with_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let config = ParserConfig::new().with_log_sink(Arc::new(TracingSink));
    let bytes = chunk(b"HEDR", &material_list(&["a"]));
    let document = Document::from_bytes_with_config(&bytes, &config).unwrap();
    assert_eq!(document.materials.len(), 1);

    TracingSink.log("direct warning", Severity::Warning);
    TracingSink.log("direct error", Severity::Error);
}

#[test]
fn test_null_sink_discards() {
    NullSink.log("ignored", Severity::Error);
    let config = ParserConfig::new().with_log_sink(Arc::new(NullSink));
    assert!(Document::from_bytes_with_config(b"HEDR\x00\x00\x00\x00", &config).is_ok());
}

#[test]
fn test_successful_load_logs_no_errors() {
    let recorder = Arc::new(Recorder::default());
    let config = ParserConfig::new().with_log_sink(recorder.clone());
    let bytes = chunk(b"HEDR", &material_list(&["a", "b"]));
    Document::from_bytes_with_config(&bytes, &config).unwrap();

    let seen = recorder.0.lock().unwrap();
    assert!(!seen.is_empty());
    assert!(seen.iter().all(|s| *s < Severity::Error));
}

#[test]
fn test_failed_load_logs_one_error() {
    let recorder = Arc::new(Recorder::default());
    let config = ParserConfig::new().with_log_sink(recorder.clone());
    let bytes = chunk(b"HEDR", &chunk(b"SEGM", &chunk(b"POSL", &(-3i32).to_le_bytes())));
    assert!(Document::from_bytes_with_config(&bytes, &config).is_err());

    let errors = recorder
        .0
        .lock()
        .unwrap()
        .iter()
        .filter(|s| **s == Severity::Error)
        .count();
    assert_eq!(errors, 1);
}
