//! Transcription and summarization pipeline.
//!
//! Two sequential vendor calls followed by a single record write. Both
//! calls block the invocation; neither is retried. The record store is
//! written only after both steps succeed, so a failure at either step
//! leaves no partial state behind.

use crate::error::Result;
use crate::store::{RecordPatch, RecordStore, SummaryRecord};
use crate::summarization::Summarizer;
use crate::transcription::Transcriber;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

/// The transcribe-then-summarize pipeline.
pub struct Pipeline {
    transcriber: Arc<dyn Transcriber>,
    summarizer: Arc<dyn Summarizer>,
    store: Arc<dyn RecordStore>,
}

impl Pipeline {
    /// Create a new pipeline.
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        summarizer: Arc<dyn Summarizer>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            transcriber,
            summarizer,
            store,
        }
    }

    /// Transcribe audio, summarize the transcript, and store the summary
    /// under `filename`. Returns the stored record.
    #[instrument(skip(self, audio_bytes), fields(filename = %filename, bytes = audio_bytes.len()))]
    pub async fn run(&self, filename: &str, audio_bytes: Vec<u8>) -> Result<SummaryRecord> {
        info!("Transcribing '{}'", filename);
        let transcript = self.transcriber.transcribe(filename, audio_bytes).await?;

        info!("Summarizing transcript ({} chars)", transcript.len());
        let summary = self.summarizer.summarize(&transcript).await?;

        let record = self
            .store
            .upsert(filename, RecordPatch::summarized(summary, Utc::now()))
            .await?;

        info!("Stored summary for '{}'", filename);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotatError;
    use crate::store::MemoryRecordStore;
    use async_trait::async_trait;

    struct FixedTranscriber(&'static str);

    #[async_trait]
    impl Transcriber for FixedTranscriber {
        async fn transcribe(&self, _filename: &str, _audio_bytes: Vec<u8>) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingTranscriber;

    #[async_trait]
    impl Transcriber for FailingTranscriber {
        async fn transcribe(&self, _filename: &str, _audio_bytes: Vec<u8>) -> Result<String> {
            Err(NotatError::Transcription("service rejected audio".to_string()))
        }
    }

    struct FixedSummarizer(&'static str);

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, _transcript: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _transcript: &str) -> Result<String> {
            Err(NotatError::Summarization("model unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_run_stores_summary_with_created_at() {
        let store = Arc::new(MemoryRecordStore::new());
        let pipeline = Pipeline::new(
            Arc::new(FixedTranscriber("hello world")),
            Arc::new(FixedSummarizer("hello world summary")),
            store.clone(),
        );

        let record = pipeline.run("f1", vec![0u8; 16]).await.unwrap();
        assert_eq!(record.summary, "hello world summary");

        let stored = store.get("f1").await.unwrap().unwrap();
        assert_eq!(stored.summary, "hello world summary");
        assert!(stored.created_at.is_some());
        assert!(stored.embedding_ref.is_none());
    }

    #[tokio::test]
    async fn test_transcription_failure_writes_nothing() {
        let store = Arc::new(MemoryRecordStore::new());
        let pipeline = Pipeline::new(
            Arc::new(FailingTranscriber),
            Arc::new(FixedSummarizer("unused")),
            store.clone(),
        );

        let err = pipeline.run("f1", vec![0u8; 16]).await.unwrap_err();
        assert!(matches!(err, NotatError::Transcription(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_summarization_failure_writes_nothing() {
        let store = Arc::new(MemoryRecordStore::new());
        let pipeline = Pipeline::new(
            Arc::new(FixedTranscriber("hello world")),
            Arc::new(FailingSummarizer),
            store.clone(),
        );

        let err = pipeline.run("f1", vec![0u8; 16]).await.unwrap_err();
        assert!(matches!(err, NotatError::Summarization(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_rerun_overwrites_existing_summary() {
        let store = Arc::new(MemoryRecordStore::new());

        let first = Pipeline::new(
            Arc::new(FixedTranscriber("v1")),
            Arc::new(FixedSummarizer("first summary")),
            store.clone(),
        );
        first.run("f1", vec![]).await.unwrap();

        let second = Pipeline::new(
            Arc::new(FixedTranscriber("v2")),
            Arc::new(FixedSummarizer("second summary")),
            store.clone(),
        );
        second.run("f1", vec![]).await.unwrap();

        assert_eq!(store.len(), 1);
        let record = store.get("f1").await.unwrap().unwrap();
        assert_eq!(record.summary, "second summary");
    }
}
