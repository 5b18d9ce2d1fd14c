//! Link command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::embedding::OpenAIEmbedder;
use crate::linkage::Linker;
use crate::store::SqliteRecordStore;
use crate::vector_index::SqliteVectorIndex;
use anyhow::Result;
use std::sync::Arc;

/// Run the link command.
pub async fn run_link(filename: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Link) {
        Output::error(&format!("{}", e));
        Output::info("Run 'notat doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let linker = Linker::new(
        Arc::new(SqliteRecordStore::new(&settings.store_path())?),
        Arc::new(OpenAIEmbedder::with_config(
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
            settings.api_timeout(),
        )),
        Arc::new(SqliteVectorIndex::new(&settings.vector_index_path())?),
    );

    let spinner = Output::spinner("Embedding and indexing...");

    match linker.link(filename).await {
        Ok(embedding_ref) => {
            spinner.finish_and_clear();
            Output::success(&format!("Linked '{}' as vector '{}'", filename, embedding_ref));
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to link: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
