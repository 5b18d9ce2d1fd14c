//! SQLite-based vector index implementation.
//!
//! Uses SQLite with cosine similarity computed in Rust. The index lives in
//! its own database file, deliberately separate from the record store.

use super::{rank_matches, IndexEntry, IndexMatch, VectorIndex};
use crate::error::{NotatError, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, instrument};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS vectors (
    id TEXT PRIMARY KEY,
    embedding BLOB NOT NULL,
    content TEXT NOT NULL
);
"#;

/// SQLite-based vector index.
pub struct SqliteVectorIndex {
    conn: Mutex<Connection>,
}

impl SqliteVectorIndex {
    /// Create a new SQLite vector index.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized SQLite vector index at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite vector index (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Serialize embedding to bytes.
    fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
        embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    /// Deserialize embedding from bytes.
    fn bytes_to_embedding(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| {
                let arr: [u8; 4] = chunk.try_into().unwrap_or_default();
                f32::from_le_bytes(arr)
            })
            .collect()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| NotatError::VectorIndex(format!("Failed to acquire lock: {}", e)))
    }
}

#[async_trait]
impl VectorIndex for SqliteVectorIndex {
    #[instrument(skip(self, entry), fields(id = %entry.id))]
    async fn upsert(&self, entry: &IndexEntry) -> Result<usize> {
        let conn = self.lock()?;

        let upserted = conn.execute(
            "INSERT OR REPLACE INTO vectors (id, embedding, content) VALUES (?1, ?2, ?3)",
            params![
                entry.id,
                Self::embedding_to_bytes(&entry.embedding),
                entry.content,
            ],
        )?;

        debug!("Upserted vector '{}'", entry.id);
        Ok(upserted)
    }

    #[instrument(skip(self))]
    async fn fetch(&self, id: &str) -> Result<Option<Vec<f32>>> {
        let conn = self.lock()?;

        let bytes: Option<Vec<u8>> = conn
            .query_row(
                "SELECT embedding FROM vectors WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(bytes.map(|b| Self::bytes_to_embedding(&b)))
    }

    #[instrument(skip(self, vector))]
    async fn query(&self, vector: &[f32], top_k: Option<usize>) -> Result<Vec<IndexMatch>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare("SELECT id, embedding, content FROM vectors")?;
        let entries = stmt
            .query_map([], |row| {
                let embedding_bytes: Vec<u8> = row.get(1)?;
                Ok(IndexEntry {
                    id: row.get(0)?,
                    embedding: Self::bytes_to_embedding(&embedding_bytes),
                    content: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let matches = rank_matches(entries.into_iter(), vector, top_k);
        debug!("Query matched {} vectors", matches.len());

        Ok(matches)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM vectors WHERE id = ?1", params![id])?;
        Ok(())
    }

    async fn entry_count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: usize = conn.query_row("SELECT COUNT(*) FROM vectors", [], |row| row.get(0))?;
        Ok(count)
    }
}
