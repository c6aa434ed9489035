use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde_json::Value;
use std::collections::VecDeque;

use crate::config::{DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};

const LOCALIZED_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// One generated payload and when it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub payload: Value,
}

impl HistoryEntry {
    pub fn new(payload: Value, timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, payload }
    }

    /// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T09:30:00.000Z`.
    pub fn iso_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn localized_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format(LOCALIZED_FORMAT)
            .to_string()
    }
}

/// Generated payloads for the current session, oldest first.
///
/// Holds at most `limit` entries (never more than 50); appending beyond that
/// evicts from the front.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.clamp(1, MAX_HISTORY_LIMIT);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.limit {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::debug!(
                    evicted = %evicted.iso_timestamp(),
                    limit = self.limit,
                    "History full, dropped oldest entry"
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// `"1. <localized timestamp>"` per entry, oldest first.
    pub fn summary_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{}. {}", i + 1, entry.localized_timestamp()))
            .collect()
    }
}
