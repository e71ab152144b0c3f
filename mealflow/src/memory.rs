//! Volatile per-session memory of pipeline runs.
//!
//! The store is process-local and append-only for the lifetime of the
//! process; nothing is persisted. Records come back in insertion order
//! per session, which doubles as chronological order.

use crate::model::{PipelineResult, PipelineStatus};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One remembered pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Unique record id.
    pub id: Uuid,
    /// Session the run belonged to.
    pub session_id: String,
    /// When the record was appended.
    pub timestamp: DateTime<Utc>,
    /// The run's outcome, outputs included.
    pub result: PipelineResult,
}

/// Criteria for [`SessionMemoryStore::query_filtered`]. An empty filter
/// matches every record.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilter {
    status: Option<PipelineStatus>,
    since: Option<DateTime<Utc>>,
}

impl MemoryFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only records whose run finished with `status`.
    #[must_use]
    pub fn with_status(mut self, status: PipelineStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Only records appended at or after `since`.
    #[must_use]
    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    fn matches(&self, record: &MemoryRecord) -> bool {
        self.status.map_or(true, |s| record.result.status == s)
            && self.since.map_or(true, |since| record.timestamp >= since)
    }
}

/// Aggregate counts across the whole store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Total records across all sessions.
    pub record_count: usize,
    /// Number of sessions with at least one record.
    pub distinct_sessions: usize,
}

/// In-process store of remembered runs, keyed by session.
#[derive(Debug, Default)]
pub struct SessionMemoryStore {
    records: RwLock<HashMap<String, Vec<MemoryRecord>>>,
}

impl SessionMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a run to its session's history and returns the stored
    /// record.
    pub fn append(&self, result: PipelineResult) -> MemoryRecord {
        let record = MemoryRecord {
            id: Uuid::new_v4(),
            session_id: result.request.session_id.clone(),
            timestamp: Utc::now(),
            result,
        };
        self.records
            .write()
            .entry(record.session_id.clone())
            .or_default()
            .push(record.clone());
        tracing::debug!(session_id = %record.session_id, record_id = %record.id, "appended memory record");
        record
    }

    /// All records for `session_id`, oldest first. Unknown sessions
    /// yield an empty list.
    #[must_use]
    pub fn query(&self, session_id: &str) -> Vec<MemoryRecord> {
        self.records
            .read()
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Records for `session_id` matching `filter`, oldest first.
    #[must_use]
    pub fn query_filtered(&self, session_id: &str, filter: &MemoryFilter) -> Vec<MemoryRecord> {
        self.records
            .read()
            .get(session_id)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| filter.matches(r))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Counts across every session.
    #[must_use]
    pub fn stats(&self) -> MemoryStats {
        let records = self.records.read();
        MemoryStats {
            record_count: records.values().map(Vec::len).sum(),
            distinct_sessions: records.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PipelineResult, StepName, UserRequest};

    fn result_for(session: &str) -> PipelineResult {
        PipelineResult::new(UserRequest::new("vegetarian, 2000 calories", session))
    }

    #[test]
    fn test_query_preserves_insertion_order() {
        let store = SessionMemoryStore::new();
        let first = store.append(result_for("s1"));
        let second = store.append(result_for("s1"));

        let records = store.query("s1");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, first.id);
        assert_eq!(records[1].id, second.id);
        assert!(records[0].timestamp <= records[1].timestamp);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionMemoryStore::new();
        store.append(result_for("s1"));
        store.append(result_for("s2"));

        assert_eq!(store.query("s1").len(), 1);
        assert_eq!(store.query("s2").len(), 1);
        assert!(store.query("s3").is_empty());
    }

    #[test]
    fn test_stats_count_records_and_sessions() {
        let store = SessionMemoryStore::new();
        assert_eq!(
            store.stats(),
            MemoryStats {
                record_count: 0,
                distinct_sessions: 0
            }
        );

        store.append(result_for("s1"));
        store.append(result_for("s1"));
        store.append(result_for("s2"));

        assert_eq!(
            store.stats(),
            MemoryStats {
                record_count: 3,
                distinct_sessions: 2
            }
        );
    }

    #[test]
    fn test_filter_by_status() {
        let store = SessionMemoryStore::new();
        store.append(result_for("s1"));
        store.append(result_for("s1").partial(StepName::Shopping, "price service down"));

        let partial = store.query_filtered(
            "s1",
            &MemoryFilter::new().with_status(PipelineStatus::Partial),
        );
        assert_eq!(partial.len(), 1);
        assert_eq!(partial[0].result.failed_step, Some(StepName::Shopping));

        let all = store.query_filtered("s1", &MemoryFilter::new());
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_filter_by_since() {
        let store = SessionMemoryStore::new();
        let record = store.append(result_for("s1"));

        let none = store.query_filtered(
            "s1",
            &MemoryFilter::new().with_since(record.timestamp + chrono::Duration::seconds(1)),
        );
        assert!(none.is_empty());

        let some = store.query_filtered("s1", &MemoryFilter::new().with_since(record.timestamp));
        assert_eq!(some.len(), 1);
    }
}
