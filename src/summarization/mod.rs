//! Transcript summarization.

mod openai;

pub use openai::OpenAISummarizer;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for summarization implementations.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize a transcript, returning trimmed summary text.
    async fn summarize(&self, transcript: &str) -> Result<String>;
}
