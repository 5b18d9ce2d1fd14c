//! List command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::{RecordStore, SqliteRecordStore};
use anyhow::Result;

/// Run the list command.
pub async fn run_list(settings: Settings) -> Result<()> {
    let store = SqliteRecordStore::new(&settings.store_path())?;

    match store.get_all().await {
        Ok(records) => {
            if records.is_empty() {
                Output::info("No summaries stored yet. Use 'notat summarize <audio>' to add one.");
            } else {
                Output::header(&format!("Stored Summaries ({})", records.len()));
                println!();

                for record in &records {
                    let created = record
                        .created_at
                        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string());
                    Output::record_line(
                        &record.filename,
                        created.as_deref(),
                        record.embedding_ref.is_some(),
                        &record.summary,
                    );
                }

                let linked = records.iter().filter(|r| r.embedding_ref.is_some()).count();
                println!();
                Output::kv("Total records", &records.len().to_string());
                Output::kv("Linked", &linked.to_string());
            }
        }
        Err(e) => {
            Output::error(&format!("Failed to list summaries: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
