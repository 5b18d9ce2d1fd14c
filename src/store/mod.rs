//! Record store for summary records.
//!
//! Provides a trait-based interface over the collection of stored summaries,
//! keyed by filename.

mod memory;
mod sqlite;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored summary record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Storage-level identity. Generated at first insert and never changed;
    /// reused as the vector-index key on every link of this record.
    pub id: Uuid,
    /// Filename the summary was produced from. Unique key within the store.
    pub filename: String,
    /// Summary text. Empty until summarization completes.
    pub summary: String,
    /// Set at first write; used for display ordering (descending).
    pub created_at: Option<DateTime<Utc>>,
    /// Reference to this record's entry in the vector index, if linked.
    pub embedding_ref: Option<String>,
}

impl SummaryRecord {
    /// Create a fresh record for a filename, applying an initial patch.
    pub fn new(filename: &str, patch: RecordPatch) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            summary: patch.summary.unwrap_or_default(),
            created_at: patch.created_at,
            embedding_ref: patch.embedding_ref,
        }
    }

    /// Merge a patch into this record. Unset fields are left untouched.
    pub fn apply(&mut self, patch: RecordPatch) {
        if let Some(summary) = patch.summary {
            self.summary = summary;
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = Some(created_at);
        }
        if let Some(embedding_ref) = patch.embedding_ref {
            self.embedding_ref = Some(embedding_ref);
        }
    }
}

/// Fields to merge into a record on upsert. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub summary: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub embedding_ref: Option<String>,
}

impl RecordPatch {
    /// Patch written by the pipeline after a successful summarization.
    pub fn summarized(summary: String, created_at: DateTime<Utc>) -> Self {
        Self {
            summary: Some(summary),
            created_at: Some(created_at),
            embedding_ref: None,
        }
    }

    /// Patch written by the linkage step after a confirmed index upsert.
    pub fn linked(embedding_ref: String) -> Self {
        Self {
            summary: None,
            created_at: None,
            embedding_ref: Some(embedding_ref),
        }
    }
}

/// Trait for record store implementations.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record or merge `patch` into the existing record with a
    /// matching filename. Never errors on "already exists".
    async fn upsert(&self, filename: &str, patch: RecordPatch) -> Result<SummaryRecord>;

    /// Point lookup by filename.
    async fn get(&self, filename: &str) -> Result<Option<SummaryRecord>>;

    /// All records, ordered by `created_at` descending. Records without a
    /// `created_at` sort last; their relative order is unspecified.
    async fn get_all(&self) -> Result<Vec<SummaryRecord>>;

    /// Remove a record. No-op if absent.
    async fn delete(&self, filename: &str) -> Result<()>;

    /// Change a record's key. Fails with `Conflict` if `new_filename` already
    /// names another record, `NotFound` if `old_filename` is absent.
    async fn rename(&self, old_filename: &str, new_filename: &str) -> Result<()>;
}

/// Sort records by `created_at` descending, missing timestamps last.
pub fn sort_by_created_at_desc(records: &mut [SummaryRecord]) {
    records.sort_by(|a, b| match (&b.created_at, &a.created_at) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_apply_merges_set_fields_only() {
        let mut record = SummaryRecord::new(
            "lecture1",
            RecordPatch::summarized("first".to_string(), at(100)),
        );

        record.apply(RecordPatch::linked("ref-1".to_string()));

        assert_eq!(record.summary, "first");
        assert_eq!(record.created_at, Some(at(100)));
        assert_eq!(record.embedding_ref.as_deref(), Some("ref-1"));
    }

    #[test]
    fn test_sort_missing_created_at_last() {
        let mut records = vec![
            SummaryRecord::new("a", RecordPatch::default()),
            SummaryRecord::new(
                "b",
                RecordPatch::summarized("s".to_string(), at(100)),
            ),
            SummaryRecord::new(
                "c",
                RecordPatch::summarized("s".to_string(), at(300)),
            ),
            SummaryRecord::new(
                "d",
                RecordPatch::summarized("s".to_string(), at(200)),
            ),
        ];

        sort_by_created_at_desc(&mut records);

        let names: Vec<&str> = records.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["c", "d", "b", "a"]);
    }
}
