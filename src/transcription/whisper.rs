//! OpenAI Whisper transcription implementation.

use super::Transcriber;
use crate::error::{NotatError, Result};
use crate::openai::{create_client, DEFAULT_TIMEOUT};
use async_openai::types::{AudioInput, CreateTranscriptionRequestArgs};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// OpenAI Whisper-based transcriber.
pub struct WhisperTranscriber {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl WhisperTranscriber {
    /// Create a new Whisper transcriber with default settings.
    pub fn new() -> Self {
        Self::with_config("whisper-1", DEFAULT_TIMEOUT)
    }

    /// Create a new Whisper transcriber with a custom model and timeout.
    pub fn with_config(model: &str, timeout: Duration) -> Self {
        Self {
            client: create_client(timeout),
            model: model.to_string(),
        }
    }
}

impl Default for WhisperTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    #[instrument(skip(self, audio_bytes), fields(bytes = audio_bytes.len()))]
    async fn transcribe(&self, filename: &str, audio_bytes: Vec<u8>) -> Result<String> {
        debug!("Transcribing '{}' with {}", filename, self.model);

        // The service infers the container format from the extension; stored
        // keys carry none, and persisted recordings are always wav.
        let upload_name = if filename.contains('.') {
            filename.to_string()
        } else {
            format!("{}.wav", filename)
        };

        let request = CreateTranscriptionRequestArgs::default()
            .file(AudioInput::from_vec_u8(upload_name, audio_bytes))
            .model(&self.model)
            .build()
            .map_err(|e| NotatError::Transcription(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe(request)
            .await
            .map_err(|e| NotatError::Transcription(format!("Whisper API error: {}", e)))?;

        let transcript = response.text.trim().to_string();
        debug!("Transcribed {} characters", transcript.len());

        Ok(transcript)
    }
}
