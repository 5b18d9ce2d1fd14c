//! Vector index abstraction.
//!
//! The index is keyed by string id (the record's own id), holds one dense
//! vector per key with the summary text alongside it, and is a separate
//! store from the record collection: nothing ties writes to the two
//! together, and deleting a record never removes its index entry.

mod memory;
mod sqlite;

pub use memory::MemoryVectorIndex;
pub use sqlite::SqliteVectorIndex;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An entry stored in the vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Key within the index. The record's stable id, reused on re-link.
    pub id: String,
    /// Dense embedding vector.
    pub embedding: Vec<f32>,
    /// Text the vector was computed from, returned with query matches.
    pub content: String,
}

/// A similarity search match.
#[derive(Debug, Clone)]
pub struct IndexMatch {
    /// The matched entry.
    pub entry: IndexEntry,
    /// Cosine similarity score (higher is better).
    pub score: f32,
}

/// Trait for vector index implementations.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Store an entry, replacing any entry with the same id. Returns the
    /// confirmed number of upserted vectors; callers treat zero as failure.
    async fn upsert(&self, entry: &IndexEntry) -> Result<usize>;

    /// Fetch a stored vector by id.
    async fn fetch(&self, id: &str) -> Result<Option<Vec<f32>>>;

    /// Similarity search. `top_k` of `None` returns every entry, ordered by
    /// score; callers that want bounded results must pass an explicit limit.
    async fn query(&self, vector: &[f32], top_k: Option<usize>) -> Result<Vec<IndexMatch>>;

    /// Remove an entry. No-op if absent.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Total number of stored entries.
    async fn entry_count(&self) -> Result<usize>;
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Rank entries by cosine similarity and apply the optional limit.
pub(crate) fn rank_matches(
    entries: impl Iterator<Item = IndexEntry>,
    vector: &[f32],
    top_k: Option<usize>,
) -> Vec<IndexMatch> {
    let mut matches: Vec<IndexMatch> = entries
        .map(|entry| {
            let score = cosine_similarity(vector, &entry.embedding);
            IndexMatch { entry, score }
        })
        .collect();

    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    if let Some(k) = top_k {
        matches.truncate(k);
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);
    }

    fn entry(id: &str, embedding: Vec<f32>) -> IndexEntry {
        IndexEntry {
            id: id.to_string(),
            embedding,
            content: format!("content of {}", id),
        }
    }

    #[test]
    fn test_rank_matches_with_limit() {
        let entries = vec![
            entry("far", vec![0.0, 1.0]),
            entry("near", vec![1.0, 0.0]),
            entry("mid", vec![1.0, 1.0]),
        ];

        let ranked = rank_matches(entries.into_iter(), &[1.0, 0.0], Some(2));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].entry.id, "near");
        assert_eq!(ranked[1].entry.id, "mid");
    }

    #[test]
    fn test_rank_matches_unlimited_returns_everything() {
        let entries = vec![
            entry("a", vec![1.0, 0.0]),
            entry("b", vec![0.0, 1.0]),
            entry("c", vec![1.0, 1.0]),
        ];

        let ranked = rank_matches(entries.into_iter(), &[1.0, 0.0], None);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].entry.id, "a");
    }
}
