//! Port for structured transcript logging.
//!
//! Separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the exchange itself
//! (turns, outcomes) in a machine-readable format for audit and inspection.

use serde_json::Value;

/// A structured exchange event for logging.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "exchange_started", "turn").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording exchange events to a structured log.
///
/// The `log` method is intentionally synchronous and non-fallible so that
/// logging problems can never disrupt a running exchange.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
