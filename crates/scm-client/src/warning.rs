//! Warning sink
//!
//! Soft conditions (a name lookup matching several objects) are reported
//! through an injectable sink instead of straight to the global logger, so
//! callers and tests can observe them.

use std::fmt;

/// Receives non-fatal warnings
pub trait WarningSink: Send + Sync + fmt::Debug {
    fn warn(&self, message: &str);
}

/// Default sink: forwards to `tracing::warn!`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingWarningSink;

impl WarningSink for TracingWarningSink {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Sink that keeps every message for later assertions
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, Default)]
pub struct RecordingWarningSink {
    messages: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

#[cfg(any(test, feature = "test-util"))]
impl RecordingWarningSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[cfg(any(test, feature = "test-util"))]
impl WarningSink for RecordingWarningSink {
    fn warn(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(message.to_string());
    }
}
