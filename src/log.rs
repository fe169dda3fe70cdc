//! Injected logging for parse and write operations
//!
//! The codec never logs through global state directly. Operations that report
//! progress or problems take a [`LogSink`] (usually through
//! [`ParserConfig`](crate::ParserConfig)). The default sink forwards to
//! `tracing`, so applications that install a subscriber see the messages under
//! the `libmsh` target.

/// Severity of a log message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Progress information, e.g. a chunk was found
    Info,
    /// Something unusual that does not stop the operation
    Warning,
    /// A failure that is about to be returned to the caller
    Error,
}

/// Destination for log messages
///
/// Implementations must not block or fail; a sink that cannot deliver a
/// message drops it.
///
/// # Example
///
/// ```
/// use libmsh::{LogSink, ParserConfig, Severity};
/// use std::sync::{Arc, Mutex};
///
/// #[derive(Default)]
/// struct Collect(Mutex<Vec<String>>);
///
/// impl LogSink for Collect {
///     fn log(&self, message: &str, severity: Severity) {
///         if severity >= Severity::Warning {
///             self.0.lock().unwrap().push(message.to_string());
///         }
///     }
/// }
///
/// let config = ParserConfig::new().with_log_sink(Arc::new(Collect::default()));
/// ```
pub trait LogSink: Send + Sync {
    /// Record one message
    fn log(&self, message: &str, severity: Severity);
}

/// Sink that forwards messages to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => tracing::debug!(target: "libmsh", "{}", message),
            Severity::Warning => tracing::warn!(target: "libmsh", "{}", message),
            Severity::Error => tracing::error!(target: "libmsh", "{}", message),
        }
    }
}

/// Sink that discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _message: &str, _severity: Severity) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_sinks_accept_all_severities() {
        let sinks: [&dyn LogSink; 2] = [&TracingSink, &NullSink];
        for sink in sinks {
            sink.log("info", Severity::Info);
            sink.log("warning", Severity::Warning);
            sink.log("error", Severity::Error);
        }
    }
}
