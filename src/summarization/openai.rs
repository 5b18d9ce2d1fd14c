//! OpenAI completion-based summarizer.

use super::Summarizer;
use crate::config::Prompts;
use crate::error::{NotatError, Result};
use crate::openai::{create_client, DEFAULT_TIMEOUT};
use async_openai::types::CreateCompletionRequestArgs;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Summarizer backed by the OpenAI completions API.
///
/// Uses an instruct-style model with a fixed instruction template and a
/// fixed token budget for the summary.
pub struct OpenAISummarizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    max_tokens: u32,
    instruction: String,
}

impl OpenAISummarizer {
    /// Create a new summarizer with default settings.
    pub fn new() -> Self {
        Self::with_config(
            "gpt-3.5-turbo-instruct",
            200,
            &Prompts::default().summarization.instruction,
            DEFAULT_TIMEOUT,
        )
    }

    /// Create a new summarizer with custom model, token budget, template
    /// and request timeout.
    pub fn with_config(model: &str, max_tokens: u32, instruction: &str, timeout: Duration) -> Self {
        Self {
            client: create_client(timeout),
            model: model.to_string(),
            max_tokens,
            instruction: instruction.to_string(),
        }
    }
}

impl Default for OpenAISummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Summarizer for OpenAISummarizer {
    #[instrument(skip(self, transcript), fields(chars = transcript.len()))]
    async fn summarize(&self, transcript: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());
        let prompt = Prompts::render(&self.instruction, &vars);

        debug!("Requesting summary with {}", self.model);

        let request = CreateCompletionRequestArgs::default()
            .model(&self.model)
            .prompt(prompt)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| NotatError::Summarization(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .completions()
            .create(request)
            .await
            .map_err(|e| NotatError::Summarization(format!("Completion API error: {}", e)))?;

        let summary = response
            .choices
            .first()
            .map(|c| c.text.trim().to_string())
            .ok_or_else(|| NotatError::Summarization("Empty completion response".to_string()))?;

        debug!("Received summary ({} chars)", summary.len());
        Ok(summary)
    }
}
