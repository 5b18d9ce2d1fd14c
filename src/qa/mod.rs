//! Question answering over stored summaries.
//!
//! Two stateless modes. Direct mode prompts against the stored summary with
//! a legacy completion call. Retrieval mode re-fetches the record's linked
//! vector, runs a similarity search over the index, and prompts a chat model
//! with the joined match contents. Question text is never persisted.

use crate::config::Prompts;
use crate::error::{NotatError, Result};
use crate::openai::create_client;
use crate::store::RecordStore;
use std::time::Duration;
use crate::vector_index::VectorIndex;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs, CreateCompletionRequestArgs,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Separator used to join retrieved context blocks.
const CONTEXT_SEPARATOR: &str = "\n-\n";

/// Question-answering engine.
pub struct QaEngine {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    store: Arc<dyn RecordStore>,
    index: Arc<dyn VectorIndex>,
    completion_model: String,
    chat_model: String,
    answer_max_tokens: u32,
    prompts: Prompts,
}

impl QaEngine {
    /// Create a new QA engine.
    pub fn new(
        store: Arc<dyn RecordStore>,
        index: Arc<dyn VectorIndex>,
        completion_model: &str,
        chat_model: &str,
        answer_max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            client: create_client(timeout),
            store,
            index,
            completion_model: completion_model.to_string(),
            chat_model: chat_model.to_string(),
            answer_max_tokens,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Answer a question directly against the stored summary.
    #[instrument(skip(self), fields(filename = %filename))]
    pub async fn ask_direct(&self, filename: &str, question: &str) -> Result<String> {
        let record = self
            .store
            .get(filename)
            .await
            .map_err(wrap_qa)?
            .ok_or_else(|| NotatError::Qa(format!("no record named '{}'", filename)))?;

        let prompt = build_direct_prompt(&self.prompts, &record.summary, question);
        debug!("Direct prompt: {} chars", prompt.len());

        let request = CreateCompletionRequestArgs::default()
            .model(&self.completion_model)
            .prompt(prompt)
            .max_tokens(self.answer_max_tokens)
            .build()
            .map_err(|e| NotatError::Qa(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .completions()
            .create(request)
            .await
            .map_err(|e| NotatError::Qa(format!("Completion API error: {}", e)))?;

        let answer = response
            .choices
            .first()
            .map(|c| c.text.trim().to_string())
            .ok_or_else(|| NotatError::Qa("Empty completion response".to_string()))?;

        info!("Answered question about '{}'", filename);
        Ok(answer)
    }

    /// Answer a question using similarity retrieval over the vector index.
    ///
    /// Requires an explicit positive `top_k`; the index itself supports
    /// unlimited queries, but letting "no limit" reach the prompt makes the
    /// context block unbounded.
    #[instrument(skip(self), fields(filename = %filename, top_k))]
    pub async fn ask_retrieval(&self, filename: &str, question: &str, top_k: usize) -> Result<String> {
        let contexts = self.gather_context(filename, top_k).await?;
        let prompt = build_retrieval_prompt(&self.prompts, &contexts, question);
        debug!("Retrieval prompt: {} chars", prompt.len());

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| NotatError::Qa(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.chat_model)
            .messages(messages)
            .max_completion_tokens(self.answer_max_tokens)
            .build()
            .map_err(|e| NotatError::Qa(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| NotatError::Qa(format!("Chat API error: {}", e)))?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .map(|s| s.trim().to_string())
            .ok_or_else(|| NotatError::Qa("Empty chat response".to_string()))?;

        info!("Answered retrieval question about '{}'", filename);
        Ok(answer)
    }

    /// Collect context texts for a record: embedding_ref -> stored vector ->
    /// similarity matches -> match contents.
    async fn gather_context(&self, filename: &str, top_k: usize) -> Result<Vec<String>> {
        if top_k == 0 {
            return Err(NotatError::InvalidInput(
                "top_k must be a positive number of matches".to_string(),
            ));
        }

        let record = self
            .store
            .get(filename)
            .await
            .map_err(wrap_qa)?
            .ok_or_else(|| NotatError::Qa(format!("no record named '{}'", filename)))?;

        let embedding_ref = record.embedding_ref.ok_or_else(|| {
            NotatError::Qa(format!(
                "record '{}' has no embedding_ref; run 'notat link {}' first",
                filename, filename
            ))
        })?;

        let vector = self
            .index
            .fetch(&embedding_ref)
            .await
            .map_err(wrap_qa)?
            .ok_or_else(|| {
                NotatError::Qa(format!("no vector stored under '{}'", embedding_ref))
            })?;

        let matches = self
            .index
            .query(&vector, Some(top_k))
            .await
            .map_err(wrap_qa)?;

        debug!("Retrieved {} context matches", matches.len());
        Ok(matches.into_iter().map(|m| m.entry.content).collect())
    }
}

fn wrap_qa(e: NotatError) -> NotatError {
    NotatError::Qa(e.to_string())
}

/// Build the direct-mode prompt: summary, question, fixed answer suffix.
pub fn build_direct_prompt(prompts: &Prompts, summary: &str, question: &str) -> String {
    let mut vars = HashMap::new();
    vars.insert("summary".to_string(), summary.to_string());
    vars.insert("question".to_string(), question.to_string());
    Prompts::render(&prompts.qa.direct, &vars)
}

/// Build the retrieval-mode prompt from joined context blocks.
pub fn build_retrieval_prompt(prompts: &Prompts, contexts: &[String], question: &str) -> String {
    let mut vars = HashMap::new();
    vars.insert("context".to_string(), contexts.join(CONTEXT_SEPARATOR));
    vars.insert("question".to_string(), question.to_string());
    Prompts::render(&prompts.qa.retrieval, &vars).trim().to_string()
}
