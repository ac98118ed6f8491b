//! Debug output for failed nested operations

use std::sync::{Mutex, Once};
use tracing_subscriber::EnvFilter;

/// Namespace used when no configuration overrides it
pub const DEFAULT_NAMESPACE: &str = "resolver_exec::executor";

/// Receives the executor's debug messages
pub trait DebugSink: Send + Sync {
    fn emit(&self, message: &str);
}

/// Forwards messages to `tracing` at debug level
#[derive(Debug, Clone)]
pub struct TracingSink {
    namespace: String,
}

impl TracingSink {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl DebugSink for TracingSink {
    fn emit(&self, message: &str) {
        tracing::debug!(namespace = %self.namespace, "{}", message);
    }
}

/// Keeps every message in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages emitted so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl DebugSink for RecordingSink {
    fn emit(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

static INIT: Once = Once::new();

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to `default_filter`
///
/// Safe to call more than once; only the first call has an effect, and an
/// already-installed global subscriber is left in place.
pub fn init_tracing(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.emit("first");
        sink.emit("second");
        assert_eq!(sink.messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_tracing_sink_default_namespace() {
        init_tracing("debug");
        let sink = TracingSink::default();
        assert_eq!(sink.namespace(), DEFAULT_NAMESPACE);
        sink.emit("does not panic without a subscriber");
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing("info");
        init_tracing("debug");
    }
}
