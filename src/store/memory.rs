//! In-memory record store implementation.
//!
//! Useful for testing and ephemeral sessions.

use super::{sort_by_created_at_desc, RecordPatch, RecordStore, SummaryRecord};
use crate::error::{NotatError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory record store, keyed by filename.
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, SummaryRecord>>,
}

impl MemoryRecordStore {
    /// Create a new in-memory record store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Total number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// True if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn upsert(&self, filename: &str, patch: RecordPatch) -> Result<SummaryRecord> {
        let mut records = self.records.write().unwrap();
        let record = match records.get_mut(filename) {
            Some(existing) => {
                existing.apply(patch);
                existing.clone()
            }
            None => {
                let record = SummaryRecord::new(filename, patch);
                records.insert(filename.to_string(), record.clone());
                record
            }
        };
        Ok(record)
    }

    async fn get(&self, filename: &str) -> Result<Option<SummaryRecord>> {
        let records = self.records.read().unwrap();
        Ok(records.get(filename).cloned())
    }

    async fn get_all(&self) -> Result<Vec<SummaryRecord>> {
        let records = self.records.read().unwrap();
        let mut all: Vec<SummaryRecord> = records.values().cloned().collect();
        sort_by_created_at_desc(&mut all);
        Ok(all)
    }

    async fn delete(&self, filename: &str) -> Result<()> {
        let mut records = self.records.write().unwrap();
        records.remove(filename);
        Ok(())
    }

    async fn rename(&self, old_filename: &str, new_filename: &str) -> Result<()> {
        let mut records = self.records.write().unwrap();

        if records.contains_key(new_filename) {
            return Err(NotatError::Conflict(format!(
                "a record named '{}' already exists",
                new_filename
            )));
        }

        let mut record = records
            .remove(old_filename)
            .ok_or_else(|| NotatError::NotFound(old_filename.to_string()))?;
        record.filename = new_filename.to_string();
        records.insert(new_filename.to_string(), record);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(secs: i64) -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_then_get_returns_merged_fields() {
        let store = MemoryRecordStore::new();

        store
            .upsert("f1", RecordPatch::summarized("hello".to_string(), at(100)))
            .await
            .unwrap();

        let record = store.get("f1").await.unwrap().unwrap();
        assert_eq!(record.summary, "hello");
        assert_eq!(record.created_at, Some(at(100)));
        assert!(record.embedding_ref.is_none());
    }

    #[tokio::test]
    async fn test_second_upsert_merges_instead_of_duplicating() {
        let store = MemoryRecordStore::new();

        let first = store
            .upsert("f1", RecordPatch::summarized("hello".to_string(), at(100)))
            .await
            .unwrap();
        store
            .upsert("f1", RecordPatch::linked("ref-1".to_string()))
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        let record = store.get("f1").await.unwrap().unwrap();
        assert_eq!(record.id, first.id);
        assert_eq!(record.summary, "hello");
        assert_eq!(record.embedding_ref.as_deref(), Some("ref-1"));
    }

    #[tokio::test]
    async fn test_get_all_orders_by_created_at_descending() {
        let store = MemoryRecordStore::new();

        for (name, ts) in [("a", 100), ("b", 300), ("c", 200)] {
            store
                .upsert(name, RecordPatch::summarized("s".to_string(), at(ts)))
                .await
                .unwrap();
        }

        let all = store.get_all().await.unwrap();
        let times: Vec<i64> = all
            .iter()
            .map(|r| r.created_at.unwrap().timestamp())
            .collect();
        assert_eq!(times, vec![300, 200, 100]);
    }

    #[tokio::test]
    async fn test_delete_missing_record_is_noop() {
        let store = MemoryRecordStore::new();
        store.delete("never-existed").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_rename_conflict_leaves_both_records_unchanged() {
        let store = MemoryRecordStore::new();

        store
            .upsert("a", RecordPatch::summarized("summary a".to_string(), at(1)))
            .await
            .unwrap();
        store
            .upsert("b", RecordPatch::summarized("summary b".to_string(), at(2)))
            .await
            .unwrap();

        let err = store.rename("a", "b").await.unwrap_err();
        assert!(matches!(err, NotatError::Conflict(_)));

        assert_eq!(store.get("a").await.unwrap().unwrap().summary, "summary a");
        assert_eq!(store.get("b").await.unwrap().unwrap().summary, "summary b");
    }

    #[tokio::test]
    async fn test_rename_missing_record_fails() {
        let store = MemoryRecordStore::new();
        let err = store.rename("absent", "anything").await.unwrap_err();
        assert!(matches!(err, NotatError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_rename_preserves_id_and_fields() {
        let store = MemoryRecordStore::new();

        let original = store
            .upsert("old", RecordPatch::summarized("text".to_string(), at(5)))
            .await
            .unwrap();
        store.rename("old", "new").await.unwrap();

        assert!(store.get("old").await.unwrap().is_none());
        let renamed = store.get("new").await.unwrap().unwrap();
        assert_eq!(renamed.id, original.id);
        assert_eq!(renamed.summary, "text");
    }
}
