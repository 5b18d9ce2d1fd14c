//! Summarize command implementation.

use crate::audio::save_recording;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use crate::store::SqliteRecordStore;
use crate::summarization::OpenAISummarizer;
use crate::transcription::WhisperTranscriber;
use anyhow::Result;
use std::sync::Arc;

/// Run the summarize command.
pub async fn run_summarize(audio: &str, name: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Summarize) {
        Output::error(&format!("{}", e));
        Output::info("Run 'notat doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let audio_bytes = std::fs::read(audio)?;

    // Keep a copy of the recording under the store key. Saved recordings
    // accumulate; there is no cleanup.
    let saved = save_recording(&settings.recordings_dir(), &audio_bytes, name.as_deref())?;
    Output::info(&format!("Saved recording as {}", saved.path.display()));

    let store = Arc::new(SqliteRecordStore::new(&settings.store_path())?);
    let pipeline = Pipeline::new(
        Arc::new(WhisperTranscriber::with_config(
            &settings.transcription.model,
            settings.api_timeout(),
        )),
        Arc::new(OpenAISummarizer::with_config(
            &settings.summarization.model,
            settings.summarization.max_tokens,
            &settings.prompts.summarization.instruction,
            settings.api_timeout(),
        )),
        store,
    );

    let spinner = Output::spinner("Transcribing and summarizing...");

    match pipeline.run(&saved.filename, audio_bytes).await {
        Ok(record) => {
            spinner.finish_and_clear();
            Output::success(&format!("Stored summary for '{}'", record.filename));
            println!("\n{}\n", record.summary);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to summarize: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
