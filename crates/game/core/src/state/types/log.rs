//! Bounded, UI-facing event log.

use std::collections::VecDeque;

/// Category of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum LogKind {
    Info,
    Combat,
    Card,
    Party,
    Boss,
    /// An action was refused; the state is unchanged.
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    /// Action counter at the time the entry was written.
    pub nonce: u64,
    pub kind: LogKind,
    pub message: String,
}

/// Ring buffer of log entries; the oldest entry is evicted once full.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameLog {
    capacity: usize,
    entries: VecDeque<LogEntry>,
}

impl GameLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, nonce: u64, kind: LogKind, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            nonce,
            kind,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_entry_when_full() {
        let mut log = GameLog::new(2);
        log.push(0, LogKind::Info, "a");
        log.push(1, LogKind::Combat, "b");
        log.push(2, LogKind::Card, "c");

        let messages: Vec<_> = log.entries().map(|entry| entry.message.as_str()).collect();
        assert_eq!(messages, ["b", "c"]);
        assert_eq!(log.last().unwrap().kind, LogKind::Card);
    }
}
