// Persisted document types
// Defines the two JSON documents owned by the store

use serde::{Deserialize, Serialize};

/// Maximum number of visit entries retained in the log
pub const MAX_VISITS: usize = 100;

/// Maximum number of guestbook messages retained
pub const MAX_MESSAGES: usize = 50;

/// Visit log document, persisted as `visitors.json`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct VisitLog {
    /// Total visits since first run; never truncated
    pub count: u64,
    /// Recent visit metadata, oldest first
    #[serde(default)]
    pub visits: Vec<VisitEntry>,
}

/// A single home-page visit
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VisitEntry {
    /// RFC 3339 timestamp of the visit
    pub timestamp: String,
    /// Client IP address
    pub ip: String,
}

impl VisitLog {
    /// Record a visit: increment the counter, append the entry, and drop
    /// the oldest entries beyond `MAX_VISITS`
    pub fn record(&mut self, entry: VisitEntry) {
        self.count += 1;
        self.visits.push(entry);
        if self.visits.len() > MAX_VISITS {
            let excess = self.visits.len() - MAX_VISITS;
            self.visits.drain(..excess);
        }
    }
}

/// Guestbook message, persisted as an array element in `messages.json`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Message {
    pub author: String,
    pub content: String,
    /// Human-readable timestamp ("%Y-%m-%d %H:%M:%S")
    pub timestamp: String,
}

/// Append a message, dropping the oldest beyond `MAX_MESSAGES`
pub fn append_capped(messages: &mut Vec<Message>, message: Message) {
    messages.push(message);
    if messages.len() > MAX_MESSAGES {
        let excess = messages.len() - MAX_MESSAGES;
        messages.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(ip: &str) -> VisitEntry {
        VisitEntry {
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            ip: ip.to_string(),
        }
    }

    fn message(content: &str) -> Message {
        Message {
            author: "tester".to_string(),
            content: content.to_string(),
            timestamp: "2026-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_record_increments_count() {
        let mut log = VisitLog::default();
        log.record(visit("10.0.0.1"));
        log.record(visit("10.0.0.2"));
        assert_eq!(log.count, 2);
        assert_eq!(log.visits.len(), 2);
        assert_eq!(log.visits[0].ip, "10.0.0.1");
    }

    #[test]
    fn test_record_caps_entries_fifo() {
        let mut log = VisitLog::default();
        for i in 0..MAX_VISITS + 5 {
            log.record(visit(&format!("10.0.0.{i}")));
        }
        // Count keeps growing, the entry list does not
        assert_eq!(log.count, (MAX_VISITS + 5) as u64);
        assert_eq!(log.visits.len(), MAX_VISITS);
        // Oldest entries were dropped first
        assert_eq!(log.visits[0].ip, "10.0.0.5");
        assert_eq!(log.visits[MAX_VISITS - 1].ip, format!("10.0.0.{}", MAX_VISITS + 4));
    }

    #[test]
    fn test_append_capped_fifo() {
        let mut messages = Vec::new();
        for i in 0..MAX_MESSAGES + 3 {
            append_capped(&mut messages, message(&format!("message {i}")));
        }
        assert_eq!(messages.len(), MAX_MESSAGES);
        assert_eq!(messages[0].content, "message 3");
        assert_eq!(messages[MAX_MESSAGES - 1].content, format!("message {}", MAX_MESSAGES + 2));
    }

    #[test]
    fn test_visit_log_tolerates_missing_visits_field() {
        let log: VisitLog = serde_json::from_str(r#"{"count": 7}"#).expect("parse");
        assert_eq!(log.count, 7);
        assert!(log.visits.is_empty());
    }
}
