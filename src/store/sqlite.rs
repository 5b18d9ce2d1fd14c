//! SQLite-based record store implementation.
//!
//! The summaries collection is a single table keyed by filename. Filename
//! uniqueness is enforced by upsert discipline plus a UNIQUE constraint.

use super::{RecordPatch, RecordStore, SummaryRecord};
use crate::error::{NotatError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, instrument};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS records (
    id TEXT PRIMARY KEY,
    filename TEXT NOT NULL UNIQUE,
    summary TEXT NOT NULL,
    created_at TEXT,
    embedding_ref TEXT
);

CREATE INDEX IF NOT EXISTS idx_records_created_at ON records(created_at);
"#;

/// SQLite-based record store.
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Create a new SQLite record store.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // WAL mode for better concurrent performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized SQLite record store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite record store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn record_from_row(row: &Row<'_>) -> rusqlite::Result<SummaryRecord> {
        let id_str: String = row.get(0)?;
        let created_at_str: Option<String> = row.get(3)?;

        // A corrupt id must not silently become the nil UUID; it would be
        // reused as the vector-index key on the next link.
        let id = uuid::Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(SummaryRecord {
            id,
            filename: row.get(1)?,
            summary: row.get(2)?,
            created_at: created_at_str.and_then(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }),
            embedding_ref: row.get(4)?,
        })
    }

    fn write_record(conn: &Connection, record: &SummaryRecord) -> Result<()> {
        conn.execute(
            r#"
            INSERT OR REPLACE INTO records (id, filename, summary, created_at, embedding_ref)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.id.to_string(),
                record.filename,
                record.summary,
                record.created_at.map(|dt| dt.to_rfc3339()),
                record.embedding_ref,
            ],
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| NotatError::Store(format!("Failed to acquire lock: {}", e)))
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    #[instrument(skip(self, patch))]
    async fn upsert(&self, filename: &str, patch: RecordPatch) -> Result<SummaryRecord> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;

        let existing = tx
            .query_row(
                "SELECT id, filename, summary, created_at, embedding_ref FROM records WHERE filename = ?1",
                params![filename],
                Self::record_from_row,
            )
            .optional()?;

        let record = match existing {
            Some(mut record) => {
                record.apply(patch);
                record
            }
            None => SummaryRecord::new(filename, patch),
        };

        Self::write_record(&tx, &record)?;
        tx.commit()?;

        debug!("Upserted record '{}'", filename);
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn get(&self, filename: &str) -> Result<Option<SummaryRecord>> {
        let conn = self.lock()?;

        let record = conn
            .query_row(
                "SELECT id, filename, summary, created_at, embedding_ref FROM records WHERE filename = ?1",
                params![filename],
                Self::record_from_row,
            )
            .optional()?;

        Ok(record)
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<SummaryRecord>> {
        let conn = self.lock()?;

        // RFC 3339 strings in UTC sort lexicographically in time order;
        // NULL created_at sorts last.
        let mut stmt = conn.prepare(
            r#"
            SELECT id, filename, summary, created_at, embedding_ref
            FROM records
            ORDER BY (created_at IS NULL), created_at DESC
            "#,
        )?;

        let records = stmt
            .query_map([], Self::record_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn delete(&self, filename: &str) -> Result<()> {
        let conn = self.lock()?;

        let deleted = conn.execute("DELETE FROM records WHERE filename = ?1", params![filename])?;
        debug!("Deleted {} record(s) named '{}'", deleted, filename);

        Ok(())
    }

    #[instrument(skip(self))]
    async fn rename(&self, old_filename: &str, new_filename: &str) -> Result<()> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;

        let taken: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM records WHERE filename = ?1)",
            params![new_filename],
            |row| row.get(0),
        )?;
        if taken {
            return Err(NotatError::Conflict(format!(
                "a record named '{}' already exists",
                new_filename
            )));
        }

        let updated = tx.execute(
            "UPDATE records SET filename = ?1 WHERE filename = ?2",
            params![new_filename, old_filename],
        )?;
        if updated == 0 {
            return Err(NotatError::NotFound(old_filename.to_string()));
        }

        tx.commit()?;
        info!("Renamed record '{}' to '{}'", old_filename, new_filename);

        Ok(())
    }
}
