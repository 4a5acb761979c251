//! Session activity: what the dashboard, the report job and the historic
//! screen did, kept for `/logs/history` and fanned out to `/logs/stream`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::config::LOG_BUFFER_SIZE;

const FEED_CAPACITY: usize = 256;

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub source: LogSource,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSource {
    Dashboard,
    Report,
    Historic,
    Server,
}

/// Ordered by severity, so a filter can ask for "warn and above".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Which entries a reader wants. Empty filter matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LogFilter {
    pub source: Option<LogSource>,
    /// Minimum severity.
    pub level: Option<LogLevel>,
}

impl LogFilter {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.source.map_or(true, |s| s == entry.source)
            && self.level.map_or(true, |l| entry.level >= l)
    }
}

/// A newest-first slice of the activity log.
#[derive(Debug, Clone, Serialize)]
pub struct LogPage {
    pub entries: Vec<LogEntry>,
    /// Entries matching the filter before the limit was applied.
    pub matched: usize,
    /// Entries currently retained.
    pub total: usize,
}

struct Journal {
    entries: RwLock<VecDeque<LogEntry>>,
    capacity: usize,
    feed: broadcast::Sender<LogEntry>,
}

/// Cheap to clone; clones write to the same journal.
#[derive(Clone)]
pub struct ActivityLog {
    journal: Arc<Journal>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::with_capacity(LOG_BUFFER_SIZE)
    }

    /// Keeps at most `capacity` entries; the oldest are dropped first.
    pub fn with_capacity(capacity: usize) -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            journal: Arc::new(Journal {
                entries: RwLock::new(VecDeque::with_capacity(capacity)),
                capacity: capacity.max(1),
                feed,
            }),
        }
    }

    pub async fn emit(&self, source: LogSource, level: LogLevel, message: impl Into<String>) {
        let entry = LogEntry {
            timestamp: Utc::now(),
            source,
            level,
            message: message.into(),
        };

        {
            let mut entries = self.journal.entries.write().await;
            while entries.len() >= self.journal.capacity {
                entries.pop_front();
            }
            entries.push_back(entry.clone());
        }

        // No subscribers is fine.
        let _ = self.journal.feed.send(entry);
    }

    /// Up to `limit` matching entries, newest first.
    pub async fn recent(&self, limit: usize, filter: &LogFilter) -> LogPage {
        let entries = self.journal.entries.read().await;
        let matching = entries.iter().rev().filter(|e| filter.matches(e));
        LogPage {
            matched: matching.clone().count(),
            entries: matching.take(limit).cloned().collect(),
            total: entries.len(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.journal.feed.subscribe()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}
