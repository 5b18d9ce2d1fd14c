//! In-memory vector index implementation.
//!
//! Useful for testing and small datasets.

use super::{rank_matches, IndexEntry, IndexMatch, VectorIndex};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory vector index.
pub struct MemoryVectorIndex {
    entries: RwLock<HashMap<String, IndexEntry>>,
}

impl MemoryVectorIndex {
    /// Create a new in-memory vector index.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryVectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorIndex for MemoryVectorIndex {
    async fn upsert(&self, entry: &IndexEntry) -> Result<usize> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(entry.id.clone(), entry.clone());
        Ok(1)
    }

    async fn fetch(&self, id: &str) -> Result<Option<Vec<f32>>> {
        let entries = self.entries.read().unwrap();
        Ok(entries.get(id).map(|e| e.embedding.clone()))
    }

    async fn query(&self, vector: &[f32], top_k: Option<usize>) -> Result<Vec<IndexMatch>> {
        let entries = self.entries.read().unwrap();
        Ok(rank_matches(entries.values().cloned(), vector, top_k))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.remove(id);
        Ok(())
    }

    async fn entry_count(&self) -> Result<usize> {
        let entries = self.entries.read().unwrap();
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, embedding: Vec<f32>) -> IndexEntry {
        IndexEntry {
            id: id.to_string(),
            embedding,
            content: format!("content of {}", id),
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_id() {
        let index = MemoryVectorIndex::new();

        let count = index.upsert(&entry("r1", vec![1.0, 0.0])).await.unwrap();
        assert_eq!(count, 1);
        index.upsert(&entry("r1", vec![0.0, 1.0])).await.unwrap();

        assert_eq!(index.entry_count().await.unwrap(), 1);
        let vector = index.fetch("r1").await.unwrap().unwrap();
        assert_eq!(vector, vec![0.0, 1.0]);
    }

    #[tokio::test]
    async fn test_query_orders_by_similarity() {
        let index = MemoryVectorIndex::new();

        index.upsert(&entry("near", vec![1.0, 0.0])).await.unwrap();
        index.upsert(&entry("far", vec![0.0, 1.0])).await.unwrap();

        let matches = index.query(&[1.0, 0.0], Some(10)).await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].entry.id, "near");
        assert!(matches[0].score > matches[1].score);
    }

    #[tokio::test]
    async fn test_fetch_missing_id_returns_none() {
        let index = MemoryVectorIndex::new();
        assert!(index.fetch("ghost").await.unwrap().is_none());
    }
}
