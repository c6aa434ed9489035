use crate::history::{History, HistoryEntry};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Everything a session remembers between commands.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Payload from the last successful generation, cleared by a form reset.
    pub current_payload: Option<Value>,
    pub history: History,
}

impl SessionState {
    pub fn new(history_limit: usize) -> Self {
        Self {
            current_payload: None,
            history: History::with_limit(history_limit),
        }
    }

    pub fn record(&mut self, payload: Value, at: DateTime<Utc>) {
        self.history.push(HistoryEntry::new(payload.clone(), at));
        self.current_payload = Some(payload);
    }

    pub fn clear_current(&mut self) {
        self.current_payload = None;
    }
}
