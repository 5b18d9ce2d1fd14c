//! Show command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::{RecordStore, SqliteRecordStore};
use anyhow::Result;

/// Run the show command.
pub async fn run_show(filename: &str, settings: Settings) -> Result<()> {
    let store = SqliteRecordStore::new(&settings.store_path())?;

    match store.get(filename).await? {
        Some(record) => {
            Output::header(&record.filename);
            println!();
            println!("{}\n", record.summary);

            if let Some(created) = record.created_at {
                Output::kv("Created", &created.format("%Y-%m-%d %H:%M:%S UTC").to_string());
            }
            match &record.embedding_ref {
                Some(embedding_ref) => Output::kv("Embedding ref", embedding_ref),
                None => Output::kv("Embedding ref", "not linked"),
            }
        }
        None => {
            Output::error(&format!("No summary stored under '{}'", filename));
            Output::info("Use 'notat list' to see stored summaries.");
        }
    }

    Ok(())
}
