use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::{datastore::DataStore, NewSummary, SummaryRecord};

/// Append-only in-memory store, used when the service runs in test mode.
///
/// Inserts serialize behind the mutex, which preserves the insertion-order
/// invariant; reads clone a snapshot out under the same lock. Ids are random
/// UUIDs rather than collection-size counters so they stay unique even if
/// deletion is ever added.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataStore {
    records: Arc<Mutex<Vec<SummaryRecord>>>,
}

impl MemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for MemoryDataStore {
    async fn insert_summary(&self, summary: &NewSummary) -> anyhow::Result<String> {
        let record = SummaryRecord {
            id: Uuid::new_v4().to_string(),
            source_text: summary.source_text.clone(),
            summary_text: summary.summary_text.clone(),
            insights: summary.insights.clone(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        };
        let id = record.id.clone();

        self.records.lock().push(record);

        Ok(id)
    }

    async fn fetch_recent(&self, limit: i64) -> anyhow::Result<Vec<SummaryRecord>> {
        let records = self.records.lock();

        Ok(records
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn fetch_by_id(&self, id: &str) -> anyhow::Result<Option<SummaryRecord>> {
        let records = self.records.lock();

        Ok(records.iter().find(|r| r.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_summary(source: &str, summary: &str) -> NewSummary {
        NewSummary {
            source_text: source.to_string(),
            summary_text: summary.to_string(),
            insights: serde_json::json!({ "word_count": 3 }),
        }
    }

    #[tokio::test]
    async fn insert_then_fetch_by_id_returns_same_record() {
        let store = MemoryDataStore::new();
        let summary = new_summary("one two three", "short");

        let id = store.insert_summary(&summary).await.unwrap();
        let record = store.fetch_by_id(&id).await.unwrap().unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.source_text, summary.source_text);
        assert_eq!(record.summary_text, summary.summary_text);
        assert_eq!(record.insights, summary.insights);
        assert!(!record.created_at.is_empty());
    }

    #[tokio::test]
    async fn fetch_by_id_on_unknown_id_returns_none() {
        let store = MemoryDataStore::new();
        store
            .insert_summary(&new_summary("text", "summary"))
            .await
            .unwrap();

        let result = store.fetch_by_id("does-not-exist").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn fetch_recent_returns_most_recent_first() {
        let store = MemoryDataStore::new();
        let first = store
            .insert_summary(&new_summary("first", "s1"))
            .await
            .unwrap();
        let second = store
            .insert_summary(&new_summary("second", "s2"))
            .await
            .unwrap();

        let records = store.fetch_recent(50).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, second);
        assert_eq!(records[1].id, first);
    }

    #[tokio::test]
    async fn fetch_recent_respects_limit() {
        let store = MemoryDataStore::new();
        for i in 0..5 {
            store
                .insert_summary(&new_summary(&format!("text {i}"), "s"))
                .await
                .unwrap();
        }

        let records = store.fetch_recent(2).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source_text, "text 4");
        assert_eq!(records[1].source_text, "text 3");
    }

    #[tokio::test]
    async fn inserted_ids_are_unique() {
        let store = MemoryDataStore::new();
        let a = store
            .insert_summary(&new_summary("text", "s"))
            .await
            .unwrap();
        let b = store
            .insert_summary(&new_summary("text", "s"))
            .await
            .unwrap();

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn created_at_is_non_decreasing_with_insertion_order() {
        let store = MemoryDataStore::new();
        for _ in 0..3 {
            store
                .insert_summary(&new_summary("text", "s"))
                .await
                .unwrap();
        }

        let records = store.fetch_recent(10).await.unwrap();
        // most recent first, so timestamps descend down the list
        for pair in records.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }
}
