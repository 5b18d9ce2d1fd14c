//! Rename command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::{RecordStore, SqliteRecordStore};
use anyhow::Result;

/// Run the rename command.
pub async fn run_rename(old: &str, new: &str, settings: Settings) -> Result<()> {
    let store = SqliteRecordStore::new(&settings.store_path())?;

    match store.rename(old, new).await {
        Ok(()) => {
            Output::success(&format!("Renamed '{}' to '{}'", old, new));
        }
        Err(e) => {
            Output::error(&format!("Failed to rename: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
