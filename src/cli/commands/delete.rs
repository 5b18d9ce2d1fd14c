//! Delete command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::{RecordStore, SqliteRecordStore};
use anyhow::Result;

/// Run the delete command.
///
/// Deletion does not cascade to the vector index: a linked record leaves its
/// vector entry orphaned. Carried-forward behavior.
pub async fn run_delete(filename: &str, settings: Settings) -> Result<()> {
    let store = SqliteRecordStore::new(&settings.store_path())?;

    let was_linked = store
        .get(filename)
        .await?
        .is_some_and(|r| r.embedding_ref.is_some());

    store.delete(filename).await?;
    Output::success(&format!("Deleted '{}'", filename));

    if was_linked {
        Output::warning("The record's vector index entry was left in place.");
    }

    Ok(())
}
