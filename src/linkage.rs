//! Embedding linkage between the record store and the vector index.
//!
//! Linking embeds a record's summary, upserts the vector under the record's
//! stable id, and writes the reference back onto the record. The index and
//! the store share no transactional boundary: the write-back can fail after
//! the index write succeeded, leaving a vector with no `embedding_ref`
//! pointing at it. Re-linking recovers, since the same id is reused.

use crate::embedding::Embedder;
use crate::error::{NotatError, Result};
use crate::store::{RecordPatch, RecordStore};
use crate::vector_index::{IndexEntry, VectorIndex};
use std::sync::Arc;
use tracing::{info, instrument};

/// Links summary records into the vector index.
pub struct Linker {
    store: Arc<dyn RecordStore>,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
}

impl Linker {
    /// Create a new linker.
    pub fn new(
        store: Arc<dyn RecordStore>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            store,
            embedder,
            index,
        }
    }

    /// Link a record into the vector index and return the embedding ref.
    ///
    /// Fails closed: if the index does not confirm the upsert, no
    /// `embedding_ref` is written. An unconfirmed reference is worse than a
    /// missing one.
    #[instrument(skip(self))]
    pub async fn link(&self, filename: &str) -> Result<String> {
        let record = self
            .store
            .get(filename)
            .await?
            .ok_or_else(|| NotatError::NotFound(filename.to_string()))?;

        let embedding = self.embedder.embed(&record.summary).await?;

        let entry = IndexEntry {
            id: record.id.to_string(),
            embedding,
            content: record.summary.clone(),
        };

        let upserted = self.index.upsert(&entry).await?;
        if upserted == 0 {
            return Err(NotatError::VectorIndex(format!(
                "index reported zero upserted vectors for '{}'",
                filename
            )));
        }

        self.store
            .upsert(filename, RecordPatch::linked(entry.id.clone()))
            .await?;

        info!("Linked '{}' as vector '{}'", filename, entry.id);
        Ok(entry.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryRecordStore, RecordStore};
    use crate::vector_index::{IndexMatch, MemoryVectorIndex};
    use async_trait::async_trait;
    use chrono::Utc;

    struct FixedEmbedder(Vec<f32>);

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(self.0.clone())
        }

        fn dimensions(&self) -> usize {
            self.0.len()
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(NotatError::Embedding("service down".to_string()))
        }

        fn dimensions(&self) -> usize {
            0
        }
    }

    /// Index that accepts writes but never confirms them.
    struct UnconfirmedIndex;

    #[async_trait]
    impl VectorIndex for UnconfirmedIndex {
        async fn upsert(&self, _entry: &IndexEntry) -> Result<usize> {
            Ok(0)
        }

        async fn fetch(&self, _id: &str) -> Result<Option<Vec<f32>>> {
            Ok(None)
        }

        async fn query(&self, _vector: &[f32], _top_k: Option<usize>) -> Result<Vec<IndexMatch>> {
            Ok(Vec::new())
        }

        async fn delete(&self, _id: &str) -> Result<()> {
            Ok(())
        }

        async fn entry_count(&self) -> Result<usize> {
            Ok(0)
        }
    }

    async fn store_with_record(filename: &str, summary: &str) -> Arc<MemoryRecordStore> {
        let store = Arc::new(MemoryRecordStore::new());
        store
            .upsert(filename, RecordPatch::summarized(summary.to_string(), Utc::now()))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_link_writes_ref_under_record_id() {
        let store = store_with_record("f1", "a summary").await;
        let index = Arc::new(MemoryVectorIndex::new());
        let linker = Linker::new(store.clone(), Arc::new(FixedEmbedder(vec![1.0, 0.0])), index.clone());

        let embedding_ref = linker.link("f1").await.unwrap();

        let record = store.get("f1").await.unwrap().unwrap();
        assert_eq!(record.embedding_ref.as_deref(), Some(embedding_ref.as_str()));
        assert_eq!(embedding_ref, record.id.to_string());
        assert!(index.fetch(&embedding_ref).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_relink_reuses_same_id() {
        let store = store_with_record("f1", "a summary").await;
        let index = Arc::new(MemoryVectorIndex::new());
        let linker = Linker::new(store.clone(), Arc::new(FixedEmbedder(vec![1.0, 0.0])), index.clone());

        let first = linker.link("f1").await.unwrap();
        let second = linker.link("f1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(index.entry_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_link_missing_record_fails() {
        let store = Arc::new(MemoryRecordStore::new());
        let linker = Linker::new(
            store,
            Arc::new(FixedEmbedder(vec![1.0])),
            Arc::new(MemoryVectorIndex::new()),
        );

        let err = linker.link("ghost").await.unwrap_err();
        assert!(matches!(err, NotatError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_embedding_failure_leaves_ref_absent() {
        let store = store_with_record("f1", "a summary").await;
        let linker = Linker::new(
            store.clone(),
            Arc::new(FailingEmbedder),
            Arc::new(MemoryVectorIndex::new()),
        );

        let err = linker.link("f1").await.unwrap_err();
        assert!(matches!(err, NotatError::Embedding(_)));
        assert!(store.get("f1").await.unwrap().unwrap().embedding_ref.is_none());
    }

    #[tokio::test]
    async fn test_unconfirmed_upsert_fails_closed() {
        let store = store_with_record("f1", "a summary").await;
        let linker = Linker::new(
            store.clone(),
            Arc::new(FixedEmbedder(vec![1.0, 0.0])),
            Arc::new(UnconfirmedIndex),
        );

        let err = linker.link("f1").await.unwrap_err();
        assert!(matches!(err, NotatError::VectorIndex(_)));
        assert!(store.get("f1").await.unwrap().unwrap().embedding_ref.is_none());
    }

    #[tokio::test]
    async fn test_delete_leaves_vector_entry_behind() {
        // Deleting a record does not cascade to the index; the vector entry
        // is orphaned. Carried-forward behavior, asserted here on purpose.
        let store = store_with_record("f1", "a summary").await;
        let index = Arc::new(MemoryVectorIndex::new());
        let linker = Linker::new(store.clone(), Arc::new(FixedEmbedder(vec![1.0, 0.0])), index.clone());

        let embedding_ref = linker.link("f1").await.unwrap();
        store.delete("f1").await.unwrap();

        assert!(store.get("f1").await.unwrap().is_none());
        assert!(index.fetch(&embedding_ref).await.unwrap().is_some());
    }
}
