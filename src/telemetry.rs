//! Telemetry Log
//!
//! Bounded in-memory record of recent user-facing mutations, surfaced by
//! the diagnostics endpoint.

use std::collections::VecDeque;

use chrono::Local;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// Default number of events retained.
pub const DEFAULT_TELEMETRY_CAPACITY: usize = 100;

// == Telemetry Event ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryEvent {
    /// Event name, e.g. `add_task`
    pub event: String,
    pub username: Option<String>,
    pub details: Option<Value>,
    /// Local time, RFC 3339
    pub timestamp: String,
}

// == Telemetry Log ==
/// Ring of the most recent events; the oldest is dropped once full.
#[derive(Debug)]
pub struct TelemetryLog {
    events: Mutex<VecDeque<TelemetryEvent>>,
    capacity: usize,
}

impl TelemetryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    // == Record ==
    /// Appends an event and logs it on the `telemetry` target.
    pub fn record(&self, event: &str, username: Option<&str>, details: Option<Value>) {
        let entry = TelemetryEvent {
            event: event.to_string(),
            username: username.map(str::to_string),
            details,
            timestamp: Local::now().to_rfc3339(),
        };
        info!(
            target: "telemetry",
            event = %entry.event,
            username = ?entry.username,
            details = ?entry.details,
            "telemetry event"
        );

        let mut events = self.events.lock();
        events.push_back(entry);
        while events.len() > self.capacity {
            events.pop_front();
        }
    }

    // == Recent ==
    /// Returns retained events, oldest first.
    pub fn recent(&self) -> Vec<TelemetryEvent> {
        self.events.lock().iter().cloned().collect()
    }
}

impl Default for TelemetryLog {
    fn default() -> Self {
        Self::new(DEFAULT_TELEMETRY_CAPACITY)
    }
}
